use crate::chip::chip8::constants::{CHIP8_OUTPUT_HEIGHT, CHIP8_OUTPUT_WIDTH};
use crate::chip::{chip8::Chip8, Chip, ChipWithCursiveDisplay};

use cursive::{
    direction::Direction,
    event::{Event, EventResult},
    theme::{BaseColor, Color, ColorStyle},
    view::View,
    CbSink, Printer, Vec2,
};

/// Represents the display of the Chip 8. It presents whatever logical
/// sub-grid of the output pins the machine currently drives, plus a status
/// row underneath.
pub struct Display {
    pixels: [bool; CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT],
    width: usize,
    height: usize,
    beeping: bool,
}

impl Display {
    /// Creates a new display from the full pin array, the logical
    /// resolution to present and the state of the tone.
    pub fn new(pixels: &[bool], resolution: (usize, usize), beeping: bool) -> Self {
        assert_eq!(pixels.len(), CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT);
        let mut tmp = [false; CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT];
        tmp.copy_from_slice(&pixels[..]);
        Display {
            pixels: tmp,
            width: resolution.0,
            height: resolution.1,
            beeping,
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(
            &[false; CHIP8_OUTPUT_WIDTH * CHIP8_OUTPUT_HEIGHT],
            (64, 32),
            false,
        )
    }
}

/// Implements cursive::view::View for Display to enable drawing it
/// as a View out of the box.
impl View for Display {
    fn draw(&self, printer: &Printer) {
        printer.with_color(
            ColorStyle::new(Color::Dark(BaseColor::Black), Color::RgbLowRes(0, 0, 0)),
            |printer| {
                for x in 0..self.width {
                    for y in 0..self.height {
                        if self.pixels[x + CHIP8_OUTPUT_WIDTH * y] {
                            printer.print((x, y), " ");
                        }
                    }
                }
            },
        );

        let status = format!(
            "{}x{}{}",
            self.width,
            self.height,
            if self.beeping { " BEEP" } else { "" }
        );
        printer.print((0, self.height), &status);
    }

    fn take_focus(&mut self, _: Direction) -> bool {
        true
    }

    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    fn required_size(&mut self, _: Vec2) -> Vec2 {
        Vec2 {
            x: self.width,
            y: self.height + 1,
        }
    }
}

impl ChipWithCursiveDisplay for Chip8 {
    fn update_ui(&mut self, gfx_sink: &CbSink) {
        fn get_display(chip: &Chip8) -> Display {
            Display::new(
                chip.read_output_pins(),
                chip.output_resolution(),
                chip.is_beeping(),
            )
        }

        if !self.draw {
            return;
        }
        let display = get_display(&self);
        gfx_sink
            .send(Box::new(Box::new(move |s: &mut cursive::Cursive| {
                s.pop_layer();
                s.add_layer(display);
            })))
            .expect("Sending updated display failed");
        self.draw = false;
    }
}
