use crate::{parse_modules, ModuleMap};

/// A small module list covering tainted, untainted, hex and decimal columns.
pub const SAMPLE_MODULES: &str = "\
usbcore 155648 6 ehci_hcd,xhci_hcd, Live 0x0000000000000000 (O)
ehci_hcd 65536 1 - Live 0xffffffffc0300000
usb_storage 69632 1 ehci_hcd,uas, Live 0x0 (OE)
loop 40960 0 - Live 0x0
";

// Helper function to parse SAMPLE_MODULES
pub fn sample_modules() -> ModuleMap {
    parse_modules(SAMPLE_MODULES.as_bytes(), "sample").unwrap()
}
