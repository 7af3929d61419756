use crossbeam_channel::{bounded, Receiver, Sender};
use cursive::CbSink;
use std::env;
use std::time::{Duration, Instant};

use schip_emulator::chip::{
    chip8::cursive_display::Display,
    chip8::quirks::{Mode, Quirks},
    chip8::Chip8,
    Chip, ChipWithCursiveDisplay, LoadProgramError,
};

/// Instruction rate of roughly 500 cycles per second.
const CYCLE_INTERVAL: Duration = Duration::from_millis(2);

/// The delay and sound timers count down at the customary 60Hz.
const TIMER_INTERVAL: Duration = Duration::from_micros(16_667);

/// Error type for errors that occur during parsing the command line arguments
/// and loading the program based on the arguments.
enum Error {
    InvalidUsage(String),
    InvalidProgram(LoadProgramError),
}

/// Represents an event to be processed by the event loop. It is generic
/// over the type representing the pressed key.
enum Event<T> {
    /// Occurs when the key passed in the enum value was pressed.
    Key(T),

    /// Indicates that all keys are released. Note that this is a
    /// hack because OS X currently requires extra permissions to
    /// listen to key down/up events. To get around this we simply
    /// read the stdin (indirectly via registering for cursive
    /// events) and assign one key to trigger releasing all keys.
    KeyRelease,

    /// Shut down.
    Quit,
}

/// Represents the channels available to the event loop. It is generic
/// over the type representing the pressed keys.
#[derive(Clone)]
struct EventLoopChannels<T> {
    /// The channel to send the UI refresh messages to.
    gfx_sender: CbSink,

    /// The channel on which the Events are received.
    key_receiver: Receiver<Event<T>>,

    /// A channel to report that the thread has completed
    /// shutdown.
    shutdown_sender: Sender<()>,
}

/// The parsed command line arguments: the path of the program to run and
/// the quirk configuration to run it with.
struct Config {
    program_path: String,
    quirks: Quirks,
}

/// The event loop. Constantly loops over (1) process event if there
/// is any. (2) Invoke cycle on the chip. (3) Count down the timers at
/// their own rate. (4) Update the UI. (5) Sleep for the cycle interval.
/// (6) Start over. The loop ends on a quit event, on a halted chip and
/// on an execution fault.
fn event_loop<T, P, M>(mut chip: T, io_channels: EventLoopChannels<P>)
where
    T: Chip<PinAddress = P, MemoryAddress = M> + ChipWithCursiveDisplay,
{
    let mut next_timer_tick = Instant::now() + TIMER_INTERVAL;

    loop {
        match io_channels.key_receiver.try_recv() {
            Ok(Event::Key(key)) => {
                chip.set_input_pin(key, true);
            }
            Ok(Event::KeyRelease) => {
                chip.reset_input_pins();
            }
            Ok(Event::Quit) => {
                io_channels
                    .shutdown_sender
                    .send(())
                    .expect("Failed to orderly shutdown.");
                return;
            }
            Err(_) => { /* do nothing */ }
        };

        if let Err(error) = chip.cycle() {
            eprintln!("{}", error);
            quit_ui(&io_channels.gfx_sender);
            return;
        }

        while Instant::now() >= next_timer_tick {
            chip.tick_timers();
            next_timer_tick += TIMER_INTERVAL;
        }

        if chip.is_halted() {
            quit_ui(&io_channels.gfx_sender);
            return;
        }

        chip.update_ui(&io_channels.gfx_sender);

        std::thread::sleep(CYCLE_INTERVAL);
    }
}

/// Asks the UI thread to leave its run loop. The UI may already be gone,
/// so a failure to deliver is fine.
fn quit_ui(gfx_sink: &CbSink) {
    let _ = gfx_sink.send(Box::new(Box::new(|s: &mut cursive::Cursive| s.quit())));
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Interprets the command line arguments. The first argument that does not
/// look like an option is the path of the program to load. `--mode=`
/// selects the quirk profile and the per-quirk options override single
/// switches of that profile, e.g. `--shift=on`.
fn parse_args(args: &[String]) -> Result<Config, Error> {
    let mode = if args.iter().any(|arg| arg == "--mode=superchip") {
        Mode::SuperChip
    } else {
        Mode::Chip8
    };

    let mut quirks = Quirks::defaults_for_mode(mode);
    let mut program_path = None;

    for arg in args {
        if !arg.starts_with('-') {
            program_path = Some(arg.clone());
            continue;
        }

        if arg.starts_with("--mode=") {
            match &arg["--mode=".len()..] {
                "chip8" | "superchip" => continue,
                other => {
                    return Err(Error::InvalidUsage(format!("Unknown mode {}", other)));
                }
            }
        }

        let (name, value) = match arg.find('=') {
            Some(position) => (&arg[..position], &arg[position + 1..]),
            None => {
                return Err(Error::InvalidUsage(format!("Unknown option {}", arg)));
            }
        };

        let value = match parse_switch(value) {
            Some(value) => value,
            None => {
                return Err(Error::InvalidUsage(format!(
                    "Expecting on/off, yes/no, true/false or 1/0 for {}",
                    name
                )));
            }
        };

        match name {
            "--vfreset" => quirks.vf_reset = value,
            "--memory" => quirks.memory = value,
            "--clipping" => quirks.clipping = value,
            "--shift" => quirks.shift = value,
            "--jump" => quirks.jump = value,
            "--press" => quirks.press = value,
            _ => {
                return Err(Error::InvalidUsage(format!("Unknown option {}", name)));
            }
        }
    }

    match program_path {
        Some(program_path) => Ok(Config {
            program_path,
            quirks,
        }),
        None => Err(Error::InvalidUsage(
            "Expecting path to the program to load as command line argument.".to_string(),
        )),
    }
}

/// Constructs the UI and spawns the event loop and the UI thread.
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let mut chip8 = Chip8::new(config.quirks);
    if let Err(e) = chip8.load_program(&config.program_path) {
        println!("{}", Error::InvalidProgram(e));
        return;
    }

    let mut siv = cursive::default();

    let cb_sink = siv.cb_sink().clone();
    let (key_sender, key_receiver) = bounded::<Event<u8>>(10);
    let (shutdown_sender, shutdown_receiver) = bounded::<()>(1);

    std::thread::spawn(move || {
        event_loop(
            chip8,
            EventLoopChannels {
                gfx_sender: cb_sink,
                key_receiver,
                shutdown_sender,
            },
        );
    });

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Esc, move |s| {
        if sender.send(Event::Quit).is_ok() {
            let _ = shutdown_receiver.recv_timeout(Duration::from_secs(1));
        }
        s.quit();
    });

    for (i, j) in &[
        ('1', 0x1),
        ('2', 0x2),
        ('3', 0x3),
        ('4', 0xC),
        ('q', 0x4),
        ('w', 0x5),
        ('e', 0x6),
        ('r', 0xD),
        ('a', 0x7),
        ('s', 0x8),
        ('d', 0x9),
        ('f', 0xE),
        ('z', 0xA),
        ('x', 0x0),
        ('c', 0xB),
        ('v', 0xF),
    ] {
        let sender = key_sender.clone();
        siv.add_global_callback(*i, move |_s| {
            let _ = sender.send(Event::Key(*j as u8));
        });
    }

    let sender = key_sender.clone();
    siv.add_global_callback(' ', move |_s| {
        let _ = sender.send(Event::KeyRelease);
    });

    siv.add_layer(Display::default());

    siv.run();
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidUsage(message) => write!(f, "Usage: {}", message),
            Error::InvalidProgram(error) => write!(f, "{}", error),
        }
    }
}
