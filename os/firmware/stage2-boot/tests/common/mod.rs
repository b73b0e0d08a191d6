#![allow(dead_code)]

use stage2_boot::{
    BlockDevice, BootConfig, BootPhase, BootSource, KernelEntry, LoadError, Loaders, Message,
    Platform, Sequencer, SystemDataBlockRef,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    EnableReceive,
    Halt,
    IndicatorOff,
    BusyWait(u32),
    Print(Message),
    Load(BootSource),
    EnterKernel(usize),
}

pub type Events = Rc<RefCell<Vec<Event>>>;

/// What the loaders report. Receives beyond the script fail.
#[derive(Default, Clone)]
pub struct Script {
    pub sd: bool,
    pub ide: bool,
    pub receives: Vec<bool>,
    /// The kernel takes over (panics out of the sequencer) instead of returning.
    pub kernel_takes_over: bool,
}

pub struct MockFirmware {
    events: Events,
    sd: bool,
    ide: bool,
    receives: VecDeque<bool>,
}

impl Platform for MockFirmware {
    fn enable_receive(&mut self) {
        self.events.borrow_mut().push(Event::EnableReceive);
    }

    fn halt(&mut self) {
        self.events.borrow_mut().push(Event::Halt);
    }

    fn boot_indicator_off(&mut self) {
        self.events.borrow_mut().push(Event::IndicatorOff);
    }

    fn busy_wait(&mut self, ticks: u32) {
        self.events.borrow_mut().push(Event::BusyWait(ticks));
    }

    fn print(&mut self, message: Message) {
        self.events.borrow_mut().push(Event::Print(message));
    }
}

impl Loaders for MockFirmware {
    fn load_block_device(&mut self, device: BlockDevice) -> Result<(), LoadError> {
        let source = BootSource::BlockDevice(device);
        self.events.borrow_mut().push(Event::Load(source));
        let ok = match device {
            BlockDevice::Sd => self.sd,
            BlockDevice::Ide => self.ide,
        };
        if ok { Ok(()) } else { Err(LoadError::new(source)) }
    }

    fn receive_kernel(&mut self) -> Result<(), LoadError> {
        self.events.borrow_mut().push(Event::Load(BootSource::Serial));
        if self.receives.pop_front().unwrap_or(false) {
            Ok(())
        } else {
            Err(LoadError::new(BootSource::Serial))
        }
    }
}

pub struct MockKernel {
    events: Events,
    takes_over: bool,
}

impl KernelEntry for MockKernel {
    fn enter(&self, sdb: SystemDataBlockRef) {
        self.events
            .borrow_mut()
            .push(Event::EnterKernel(sdb.address()));
        assert!(!self.takes_over, "kernel took over");
    }
}

pub fn sequencer(
    config: BootConfig,
    script: Script,
) -> (Sequencer<MockFirmware, MockKernel>, Events) {
    let events = Events::default();
    let firmware = MockFirmware {
        events: Rc::clone(&events),
        sd: script.sd,
        ide: script.ide,
        receives: script.receives.into(),
    };
    let kernel = MockKernel {
        events: Rc::clone(&events),
        takes_over: script.kernel_takes_over,
    };
    let seq = Sequencer::new(config, firmware, SystemDataBlockRef::fixed(), kernel);
    (seq, events)
}

/// Step until `target` is reached; panics after `limit` steps.
pub fn step_until<F, K>(seq: &mut Sequencer<F, K>, target: BootPhase, limit: usize)
where
    F: stage2_boot::Firmware,
    K: KernelEntry,
{
    for _ in 0..limit {
        if seq.step() == target {
            return;
        }
    }
    panic!("{target:?} not reached within {limit} steps, stuck in {:?}", seq.phase());
}

pub fn prints(events: &Events) -> Vec<Message> {
    events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Print(m) => Some(*m),
            _ => None,
        })
        .collect()
}

pub fn loads(events: &Events) -> Vec<BootSource> {
    events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Load(s) => Some(*s),
            _ => None,
        })
        .collect()
}

pub fn count(events: &Events, event: Event) -> usize {
    events.borrow().iter().filter(|e| **e == event).count()
}
