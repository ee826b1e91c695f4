//! USB HID report output.
//!
//! The descriptor is chosen once at boot from the stored input mode; the
//! engine's report bytes are written to the interrupt endpoint unchanged.
//!
//! XInput and PS4 hosts expect more than a HID interface (a vendor-class
//! interface for XInput, authentication for PS4). Those modes expose their
//! report through a vendor-defined HID collection of the matching size.

use defmt::{debug, Format};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use heapless::Vec;
use stickbox_core::report::MAX_REPORT_SIZE;
use stickbox_core::InputMode;

/// Report bytes handed from the poll task to the output task.
pub type Report = Vec<u8, MAX_REPORT_SIZE>;

/// USB driver type for the RP2040.
pub type UsbDriver<'d> = Driver<'d, USB>;

/// Error type for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum OutputError {
    /// Endpoint is disabled (host not configured or cable unplugged).
    Disabled,
    /// Report does not fit the endpoint.
    BufferOverflow,
}

impl From<EndpointError> for OutputError {
    fn from(err: EndpointError) -> Self {
        match err {
            EndpointError::BufferOverflow => OutputError::BufferOverflow,
            EndpointError::Disabled => OutputError::Disabled,
        }
    }
}

/// Generic HID gamepad: 14 buttons, hat, four 8-bit axes, 12 pressure bytes.
pub const HID_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (14 buttons + 2 bits padding) ---
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0E, //   Report Count (14)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0E, //   Usage Maximum (Button 14)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Hat (one byte, 8 = centre) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    //
    // --- Sticks ---
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x46, 0xFF, 0x00, //   Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Pressure ---
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x0C, //   Report Count (12)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Switch wired controller: 14 buttons, hat nibble, four 8-bit axes, vendor byte.
pub const SWITCH_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (14 buttons + 2 bits padding) ---
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0E, //   Report Count (14)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0E, //   Usage Maximum (Button 14)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Hat (low nibble) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Sticks ---
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x46, 0xFF, 0x00, //   Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Vendor byte ---
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Keyboard with report id 1: modifiers, reserved, six keys, media keys.
pub const KEYBOARD_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    //
    // --- Modifiers ---
    0x05, 0x07, //   Usage Page (Keyboard)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Reserved ---
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Keys ---
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x00, //   Usage Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x81, 0x00, //   Input (Data, Array)
    //
    // --- Media keys ---
    0x05, 0x0C, //   Usage Page (Consumer)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x07, //   Report Count (7)
    0x09, 0xB5, //   Usage (Scan Next Track)
    0x09, 0xB6, //   Usage (Scan Previous Track)
    0x09, 0xB7, //   Usage (Stop)
    0x09, 0xCD, //   Usage (Play/Pause)
    0x09, 0xE2, //   Usage (Mute)
    0x09, 0xE9, //   Usage (Volume Increment)
    0x09, 0xEA, //   Usage (Volume Decrement)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    //
    0xC0, // End Collection
];

/// XInput layout (20 bytes) in a vendor-defined collection.
pub const XINPUT_DESCRIPTOR: &[u8] = &[
    0x06, 0x00, 0xFF, // Usage Page (Vendor Defined)
    0x09, 0x01, // Usage (0x01)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x14, //   Report Count (20)
    0x09, 0x01, //   Usage (0x01)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0xC0, // End Collection
];

/// PS4 layout: report id 1 followed by 63 bytes.
pub const PS4_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined)
    0x09, 0x20, //   Usage (0x20)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x3F, //   Report Count (63)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0xC0, // End Collection
];

/// Report descriptor for `mode`.
#[must_use]
pub const fn report_descriptor(mode: InputMode) -> &'static [u8] {
    match mode {
        InputMode::Hid => HID_DESCRIPTOR,
        InputMode::Switch => SWITCH_DESCRIPTOR,
        InputMode::XInput => XINPUT_DESCRIPTOR,
        InputMode::Keyboard => KEYBOARD_DESCRIPTOR,
        InputMode::Ps4 => PS4_DESCRIPTOR,
    }
}

/// USB vendor and product id for `mode`.
///
/// Switch hosts only accept licensed wired controllers, so that mode uses
/// the HORI Pokken ids; everything else uses the pid.codes test ids.
#[must_use]
pub const fn usb_ids(mode: InputMode) -> (u16, u16) {
    match mode {
        InputMode::Switch => (0x0F0D, 0x0092),
        _ => (0x1209, 0x0001),
    }
}

/// USB HID report output.
///
/// Wraps an embassy-usb HID writer sized for the largest report.
pub struct UsbReportOutput<'d> {
    writer: HidWriter<'d, UsbDriver<'d>, MAX_REPORT_SIZE>,
    ready: bool,
}

impl<'d> UsbReportOutput<'d> {
    /// Create a new output from the given HID writer.
    pub fn new(writer: HidWriter<'d, UsbDriver<'d>, MAX_REPORT_SIZE>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }

    /// Write one report.
    pub async fn send(&mut self, report: &[u8]) -> Result<(), OutputError> {
        self.writer.write(report).await.map_err(OutputError::from)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

/// HID request handler.
///
/// Output reports (keyboard LEDs) are accepted and logged.
pub struct ReportRequestHandler;

impl RequestHandler for ReportRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        debug!("set_report {:?}: {=[u8]:x}", id, data);
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class for `mode` in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
    handler: &'d mut ReportRequestHandler,
    mode: InputMode,
) -> HidWriter<'d, UsbDriver<'d>, MAX_REPORT_SIZE> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: report_descriptor(mode),
        request_handler: Some(handler),
        poll_ms: 1,
        max_packet_size: MAX_REPORT_SIZE as u16,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
