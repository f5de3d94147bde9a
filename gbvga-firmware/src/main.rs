//! gbvga - Handheld LCD to VGA converter firmware
//!
//! Main firmware binary for RP2040-based converter boards.
//!
//! - Core 0 busy-polls the console's LCD bus into the framebuffer, polls
//!   the wireless gamepad and runs the on-screen menu.
//! - Core 1 composes and streams 640x480 VGA scanlines (thread executor)
//!   and mirrors the gamepad onto the console's button matrix (interrupt
//!   executor).
//!
//! Core 0 only starts sampling once core 1 signals that video is up.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::{ClockConfig, CoreVoltage, PllConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::Delay;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use gbvga_core::capture::PinBus;
use gbvga_core::config::VGA_640X480_60;
use gbvga_core::input::ButtonMatrix;
use gbvga_core::menu::Dispatcher;
use gbvga_core::video::ScanlineBuffer;
use gbvga_drivers::gamepad::ClassicController;
use gbvga_drivers::matrix::SelectLines;
use gbvga_drivers::overlay::TextOverlay;
use gbvga_drivers::reset::ResetLine;
use gbvga_hal::I2cConfig;
use gbvga_hal_rp2040::timing::SYS_CLOCK_HZ;
use gbvga_hal_rp2040::{pin_bank, BlockingI2c, BoardPins, GpioInput, GpioOutput, ScanVideo};

use crate::acquisition::Acquisition;
use crate::channels::{OVERLAY_BUFFER, SETTINGS, VIDEO_READY};

mod acquisition;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

static CORE1_STACK: StaticCell<Stack<8192>> = StaticCell::new();
static CORE1_EXECUTOR: StaticCell<Executor> = StaticCell::new();
static MATRIX_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

static SCANLINES: ConstStaticCell<[ScanlineBuffer; 2]> =
    ConstStaticCell::new([ScanlineBuffer::new(), ScanlineBuffer::new()]);

const PINS: BoardPins = BoardPins::DEFAULT;

// The PIO and I2C pins are typed peripherals below, not bank pins
const _: () = assert!(PINS.color_base == 0 && PINS.hsync == 6 && PINS.vsync == 7);
const _: () = assert!(PINS.i2c_sda == 12 && PINS.i2c_scl == 13);

#[interrupt]
unsafe fn SWI_IRQ_1() {
    MATRIX_EXECUTOR.on_interrupt()
}

/// 12 MHz crystal * 125 / 5 = 300 MHz, which needs the core at 1.30 V
fn clock_config() -> ClockConfig {
    let mut clocks = ClockConfig::crystal(12_000_000);
    if let Some(xosc) = clocks.xosc.as_mut() {
        xosc.sys_pll = Some(PllConfig {
            refdiv: 1,
            fbdiv: 125,
            post_div1: 5,
            post_div2: 1,
        });
    }
    clocks.core_voltage = CoreVoltage::V1_30;
    clocks
}

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("gbvga firmware starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::new(clock_config()));
    info!("System clock: {} Hz", embassy_rp::clocks::clk_sys_freq());

    if let Err(e) = PINS.validate() {
        error!("Board pin map invalid: {}", e);
    }

    // Video: color on GPIO0-5, HSYNC/VSYNC on GPIO6-7
    let Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO0, Irqs);
    let color = [
        common.make_pio_pin(p.PIN_0),
        common.make_pio_pin(p.PIN_1),
        common.make_pio_pin(p.PIN_2),
        common.make_pio_pin(p.PIN_3),
        common.make_pio_pin(p.PIN_4),
        common.make_pio_pin(p.PIN_5),
    ];
    let sync = [common.make_pio_pin(p.PIN_6), common.make_pio_pin(p.PIN_7)];
    let video = unwrap!(ScanVideo::new(
        &mut common,
        sm0,
        sm1,
        p.DMA_CH0,
        color,
        sync,
        VGA_640X480_60,
        SYS_CLOCK_HZ,
        SCANLINES.take(),
    ));
    info!("PIO video initialized");

    // Everything else is plain GPIO, placed by the pin table
    let mut bank = pin_bank!(
        p, PIN_8, PIN_9, PIN_10, PIN_11, PIN_14, PIN_15, PIN_16, PIN_17, PIN_18, PIN_19, PIN_20,
        PIN_21, PIN_22, PIN_23, PIN_24, PIN_25, PIN_26, PIN_27, PIN_28, PIN_29,
    );
    let io = unwrap!(bank.take_signals(&PINS));

    // Button matrix: select lines in, return lines out idle high
    let select = SelectLines::new(
        Input::new(io.matrix_p14, Pull::Up),
        Input::new(io.matrix_p15, Pull::Up),
    );
    let matrix = ButtonMatrix::new(
        GpioOutput::new(Output::new(io.matrix_right_a, Level::High)),
        GpioOutput::new(Output::new(io.matrix_left_b, Level::High)),
        GpioOutput::new(Output::new(io.matrix_up_select, Level::High)),
        GpioOutput::new(Output::new(io.matrix_down_start, Level::High)),
    );

    // Keep core 0 free of per-line interrupts while it samples the LCD
    interrupt::IO_IRQ_BANK0.disable();
    interrupt::DMA_IRQ_0.disable();
    interrupt::PIO0_IRQ_0.disable();

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        unsafe {
            interrupt::IO_IRQ_BANK0.enable();
            interrupt::DMA_IRQ_0.enable();
            interrupt::PIO0_IRQ_0.enable();
        }

        interrupt::SWI_IRQ_1.set_priority(Priority::P2);
        let spawner = MATRIX_EXECUTOR.start(interrupt::SWI_IRQ_1);
        spawner.spawn(tasks::matrix_task(select, matrix)).unwrap();

        let executor = CORE1_EXECUTOR.init(Executor::new());
        executor.run(|spawner| {
            spawner.spawn(tasks::video_task(video)).unwrap();
        })
    });
    info!("Core 1 started");

    embassy_futures::block_on(VIDEO_READY.wait());
    info!("Video up, starting acquisition");

    let lcd = PinBus::new(
        GpioInput::new(Input::new(io.lcd_pixel_clock, Pull::None)),
        GpioInput::new(Input::new(io.lcd_hsync, Pull::None)),
        GpioInput::new(Input::new(io.lcd_vsync, Pull::None)),
        GpioInput::new(Input::new(io.lcd_data0, Pull::None)),
        GpioInput::new(Input::new(io.lcd_data1, Pull::None)),
    );

    // Gamepad receiver on I2C0
    let i2c = BlockingI2c::new(p.I2C0, p.PIN_13, p.PIN_12, I2cConfig::FAST);
    let gamepad = ClassicController::new(i2c, Delay);

    let reset = ResetLine::new(GpioOutput::new(Output::new(io.reset, Level::High)), Delay);
    let dispatcher = Dispatcher::new(&SETTINGS, TextOverlay::new(&OVERLAY_BUFFER), reset);
    let led = GpioOutput::new(Output::new(io.led, Level::Low));
    info!("Acquisition peripherals initialized");

    Acquisition {
        lcd,
        gamepad,
        dispatcher,
        led,
    }
    .run()
}
