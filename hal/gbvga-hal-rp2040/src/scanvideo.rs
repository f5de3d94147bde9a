//! PIO scanline video generator
//!
//! Two state machines in one PIO block produce the VGA signal:
//!
//! - The *timing* machine drives HSYNC/VSYNC from a stream of
//!   [`timing`](crate::timing) words and raises PIO IRQ 4 at the start of
//!   every visible active period.
//! - The *pixel* machine waits for that IRQ and then interprets the
//!   run-encoded token stream of one scanline at two cycles per pixel.
//!
//! The pixel program is placed at offset 0 and each primitive jumps straight
//! to the next one with `out pc, 16`, so token opcodes are the public label
//! offsets below. [`ScanVideo::new`] checks them against the encoder's
//! opcode constants before anything is started.
//!
//! Scanlines are double buffered: while DMA streams one buffer into the
//! pixel FIFO, the render callback fills the other.

use embassy_rp::dma::Channel;
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Instance, Pin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::Peri;
use gbvga_core::config::VideoMode;
use gbvga_core::video::{op, ScanlineBuffer};

use crate::timing::{clock_divider, LineTiming};

/// Number of color output pins
pub const COLOR_PINS: usize = 6;

/// Video generator setup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VideoError {
    /// Not enough free instruction memory in the PIO block
    NoProgramSpace,
    /// The pixel program did not land at offset 0
    Misplaced(u8),
    /// A pixel program label does not match the encoder opcode
    OpcodeMismatch { opcode: u16, label: i32 },
}

/// Compare (encoder opcode, program label offset) pairs
fn check_opcodes(pairs: &[(u16, i32)]) -> Result<(), VideoError> {
    match pairs.iter().find(|(opcode, label)| *opcode as i32 != *label) {
        Some(&(opcode, label)) => Err(VideoError::OpcodeMismatch { opcode, label }),
        None => Ok(()),
    }
}

fn out_config<'d, PIO: Instance>(mode: &VideoMode, sys_hz: u32) -> Config<'d, PIO> {
    let mut cfg = Config::default();
    cfg.shift_out = ShiftConfig {
        auto_fill: true,
        threshold: 32,
        direction: ShiftDirection::Right,
    };
    cfg.fifo_join = FifoJoin::TxOnly;
    cfg.clock_divider = clock_divider(sys_hz, mode.pixel_clock_hz);
    cfg
}

/// The two output paths of the generator, as seen by the frame loop
pub(crate) trait ScanOut {
    /// Start both state machines
    fn enable(&mut self);

    /// Queue one timing word, waiting for FIFO space
    async fn push_timing(&mut self, word: u32);

    /// Stream one encoded line, running `during` while it is in flight
    async fn stream_line(&mut self, words: &[u32], during: impl FnOnce());
}

/// Timing and pixel state machines plus the DMA channel feeding pixels
struct PioScanOut<'d, PIO: Instance, C: Channel, const TSM: usize, const PSM: usize> {
    timing_sm: StateMachine<'d, PIO, TSM>,
    pixel_sm: StateMachine<'d, PIO, PSM>,
    dma: Peri<'d, C>,
}

impl<PIO: Instance, C: Channel, const TSM: usize, const PSM: usize> ScanOut
    for PioScanOut<'_, PIO, C, TSM, PSM>
{
    fn enable(&mut self) {
        self.pixel_sm.set_enable(true);
        self.timing_sm.set_enable(true);
    }

    async fn push_timing(&mut self, word: u32) {
        self.timing_sm.tx().wait_push(word).await;
    }

    async fn stream_line(&mut self, words: &[u32], during: impl FnOnce()) {
        let transfer = self
            .pixel_sm
            .tx()
            .dma_push(self.dma.reborrow(), words, false);
        during();
        transfer.await;
    }
}

/// Enable output, then report that it is running
fn start<O: ScanOut>(out: &mut O, started: impl FnOnce()) {
    out.enable();
    started();
}

/// Generate one frame
///
/// Line 0 is rendered up front; every further visible line is rendered into
/// the back buffer while the previous one streams from the front buffer.
async fn drive_frame<O, F>(
    out: &mut O,
    timing: &LineTiming,
    buffers: &mut [ScanlineBuffer; 2],
    render: &mut F,
) where
    O: ScanOut,
    F: FnMut(usize, &mut ScanlineBuffer),
{
    let visible = timing.mode().v_active;
    let [first, second] = buffers;
    let (mut front, mut back) = (first, second);

    render(0, front);

    for line in 0..timing.mode().v_total() {
        for word in timing.words(line) {
            out.push_timing(word).await;
        }

        if line < visible {
            out.stream_line(front.words(), || {
                if line + 1 < visible {
                    render(line + 1, back);
                }
            })
            .await;
            core::mem::swap(&mut front, &mut back);
        }
    }
}

/// Scanline video output on one PIO block
pub struct ScanVideo<'d, PIO: Instance, C: Channel, const TSM: usize, const PSM: usize> {
    out: PioScanOut<'d, PIO, C, TSM, PSM>,
    timing: LineTiming,
    buffers: &'d mut [ScanlineBuffer; 2],
    _color: [Pin<'d, PIO>; COLOR_PINS],
    _sync: [Pin<'d, PIO>; 2],
}

impl<'d, PIO: Instance, C: Channel, const TSM: usize, const PSM: usize>
    ScanVideo<'d, PIO, C, TSM, PSM>
{
    /// Load both programs and configure the state machines
    ///
    /// The pixel program must be the first program loaded into `common`.
    /// `color` are the six color pins in bit order (R0 R1 G0 G1 B0 B1),
    /// `sync` is `[hsync, vsync]`. Nothing runs until [`ScanVideo::run`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut timing_sm: StateMachine<'d, PIO, TSM>,
        mut pixel_sm: StateMachine<'d, PIO, PSM>,
        dma: Peri<'d, C>,
        color: [Pin<'d, PIO>; COLOR_PINS],
        sync: [Pin<'d, PIO>; 2],
        mode: VideoMode,
        sys_hz: u32,
        buffers: &'d mut [ScanlineBuffer; 2],
    ) -> Result<Self, VideoError> {
        let pixel_prg = pio::pio_asm!(
            ".origin 0",
            "public eol_align:",
            "    out null, 16",
            "public eol_skip_align:",
            "    mov pins, null",
            "    wait 1 irq 4",
            "    out pc, 16",
            "public color_run:",
            "    out pins, 16",
            "    out x, 16",
            "color_loop:",
            "    jmp x-- color_loop [1]",
            "    nop",
            "    out pc, 16",
            "public raw_run:",
            "    out pins, 16",
            "    out x, 16",
            "raw_loop:",
            "    out pins, 16",
            "    jmp x-- raw_loop",
            "    out pins, 16",
            "    out pc, 16",
            "public raw_1p:",
            "    out pins, 16",
            "    out pc, 16"
        );

        let labels = &pixel_prg.public_defines;
        check_opcodes(&[
            (op::EOL_ALIGN, labels.eol_align),
            (op::EOL_SKIP_ALIGN, labels.eol_skip_align),
            (op::COLOR_RUN, labels.color_run),
            (op::RAW_RUN, labels.raw_run),
            (op::RAW_1P, labels.raw_1p),
        ])?;

        let timing_prg = pio::pio_asm!(
            ".wrap_target",
            "    out pins, 2",
            "    out x, 29",
            "    out y, 1",
            "    jmp !y idle",
            "    irq 4",
            "idle:",
            "    jmp x-- idle",
            ".wrap"
        );

        let pixel_loaded = common
            .try_load_program(&pixel_prg.program)
            .map_err(|_| VideoError::NoProgramSpace)?;
        if pixel_loaded.origin != 0 {
            return Err(VideoError::Misplaced(pixel_loaded.origin));
        }
        let timing_loaded = common
            .try_load_program(&timing_prg.program)
            .map_err(|_| VideoError::NoProgramSpace)?;

        let color_refs = color.each_ref();
        let mut cfg = out_config(&mode, sys_hz);
        cfg.use_program(&pixel_loaded, &[]);
        cfg.set_out_pins(&color_refs);
        pixel_sm.set_config(&cfg);
        pixel_sm.set_pin_dirs(Direction::Out, &color_refs);

        let sync_refs = sync.each_ref();
        let mut cfg = out_config(&mode, sys_hz);
        cfg.use_program(&timing_loaded, &[]);
        cfg.set_out_pins(&sync_refs);
        timing_sm.set_config(&cfg);
        timing_sm.set_pin_dirs(Direction::Out, &sync_refs);

        // park the pixel machine on the end-of-line wait for the first IRQ
        let jmp = pio::InstructionOperands::JMP {
            condition: pio::JmpCondition::Always,
            address: op::EOL_SKIP_ALIGN as u8,
        }
        .encode();
        unsafe { pixel_sm.exec_instr(jmp) };

        Ok(Self {
            out: PioScanOut {
                timing_sm,
                pixel_sm,
                dma,
            },
            timing: LineTiming::new(mode),
            buffers,
            _color: color,
            _sync: sync,
        })
    }

    /// Output mode being generated
    pub fn mode(&self) -> &VideoMode {
        self.timing.mode()
    }

    /// Start output and generate frames forever
    ///
    /// `started` is called once, right after both state machines are
    /// enabled. `render(line, buf)` is called exactly once per visible line
    /// per frame, one line ahead of the line being displayed. It must finish
    /// within one line period.
    pub async fn run<S, F>(&mut self, started: S, mut render: F) -> !
    where
        S: FnOnce(),
        F: FnMut(usize, &mut ScanlineBuffer),
    {
        start(&mut self.out, started);

        loop {
            drive_frame(&mut self.out, &self.timing, self.buffers, &mut render).await;
        }
    }
}
