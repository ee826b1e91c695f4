#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker, Timer};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use stickbox::{
    configure_usb_hid, poll_interval_us, usb_ids, EmbassyClock, Gamepad, GpioInput,
    HotkeyAction, InputMode, Report, ReportRequestHandler, StaticConfig, UsbReportOutput,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type Pad = Gamepad<GpioInput<Input<'static>>, EmbassyClock, StaticConfig>;

/// Latest report from the poll task. Only the most recent report matters.
static REPORT_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, Report>> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static HID_HANDLER: StaticCell<ReportRequestHandler> = StaticCell::new();

/// Register each `gpio => pin` as a pulled-up input.
macro_rules! add_pins {
    ($gpio:expr, $($num:literal => $pin:expr),+ $(,)?) => {
        $(
            if let Err(e) = $gpio.add($num, Input::new($pin, Pull::Up)) {
                error!("GPIO {} not added: {:?}", $num, e);
            }
        )+
    };
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("stickbox starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = REPORT_SIGNAL.init(Signal::new());

    // --- GPIO Setup ---
    let mut gpio = GpioInput::new();
    add_pins!(gpio,
        2 => p.PIN_2,
        3 => p.PIN_3,
        4 => p.PIN_4,
        5 => p.PIN_5,
        6 => p.PIN_6,
        7 => p.PIN_7,
        8 => p.PIN_8,
        9 => p.PIN_9,
        10 => p.PIN_10,
        11 => p.PIN_11,
        12 => p.PIN_12,
        13 => p.PIN_13,
        16 => p.PIN_16,
        17 => p.PIN_17,
        18 => p.PIN_18,
        19 => p.PIN_19,
        20 => p.PIN_20,
        21 => p.PIN_21,
    );
    info!("{} input pins configured", gpio.len());

    let mut gamepad = Gamepad::new(gpio, EmbassyClock, StaticConfig::new());

    // Sample long enough for the debounce window to settle, then honour
    // any mode button held at power-up.
    for _ in 0..10 {
        gamepad.process();
        Timer::after_millis(1).await;
    }
    select_boot_mode(&mut gamepad);
    let mode = gamepad.options().input_mode;

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let (vid, pid) = usb_ids(mode);
    let mut usb_config = UsbConfig::new(vid, pid);
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("Stickbox Arcade Controller");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class for the boot mode
    let hid_state = HID_STATE.init(State::new());
    let hid_handler = HID_HANDLER.init(ReportRequestHandler);
    let hid_writer = configure_usb_hid(&mut builder, hid_state, hid_handler, mode);

    let usb_device = builder.build();
    let usb_output = UsbReportOutput::new(hid_writer);

    // On-board LED mirrors "any button pressed"
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(poll_task(gamepad, signal, led).unwrap());
    spawner.spawn(output_task(usb_output, signal).unwrap());

    info!("stickbox initialized as {:?}", mode);
}

/// Switch to the mode requested by a held boot button and persist it.
fn select_boot_mode(gamepad: &mut Pad) {
    let Some(mode) = InputMode::from_boot_buttons(gamepad.raw_state().buttons) else {
        return;
    };
    if mode == gamepad.options().input_mode {
        return;
    }
    info!("boot button selects {:?}", mode);
    gamepad.set_input_mode(mode);
    if let Err(e) = gamepad.save() {
        warn!("failed to save boot mode: {:?}", e);
    }
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Poll task - runs one engine tick per period and signals the report.
#[embassy_executor::task]
async fn poll_task(
    mut gamepad: Pad,
    signal: &'static Signal<CriticalSectionRawMutex, Report>,
    mut led: Output<'static>,
) {
    let mut ticker = Ticker::every(Duration::from_micros(poll_interval_us()));
    loop {
        if gamepad.process() == Some(HotkeyAction::RebootDefault) {
            info!("reboot requested");
            // Let the log drain before resetting.
            Timer::after_millis(10).await;
            cortex_m::peripheral::SCB::sys_reset();
        }

        let state = gamepad.state();
        led.set_level(Level::from(!state.dpad.is_empty() || !state.buttons.is_empty()));

        match Report::from_slice(gamepad.report()) {
            // Overwrites any pending report
            Ok(report) => signal.signal(report),
            Err(_) => error!("report larger than endpoint"),
        }

        ticker.next().await;
    }
}

/// Output task - waits for report signals and writes them to USB HID.
#[embassy_executor::task]
async fn output_task(
    mut output: UsbReportOutput<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, Report>,
) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB HID ready, sending reports...");

    loop {
        let report = signal.wait().await;
        if let Err(e) = output.send(&report).await {
            error!("Output error: {:?}", e);
        }
    }
}
