use nix::sys::signal::{SigSet, Signal};
use std::io;
use std::sync::mpsc;
use std::thread;

use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    Update,
    Signal(Signal),
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
    _signal_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config, signals: SigSet) -> Dispatcher {
        // Block before spawning so every thread inherits the mask
        if let Err(err) = signals.thread_block() {
            log::warn!("Could not block signals: {}", err);
        }

        let tick_rate = config.tick_rate();
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(key) => {
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                        }
                        Err(err) => log::warn!("Could not read input: {}", err),
                    }
                }
            })
        };
        let update_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };
        let signal_handle = thread::spawn(move || loop {
            match signals.wait() {
                Ok(signal) => {
                    if tx.send(Event::Signal(signal)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    log::error!("Waiting for signals failed: {}", err);
                    return;
                }
            }
        });
        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
            _signal_handle: signal_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
