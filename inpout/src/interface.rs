pub(crate) type Out32 = unsafe extern "system" fn(port_address: u16, data: u16);
pub(crate) type Inp32 = unsafe extern "system" fn(port_address: u16) -> u16;
pub(crate) type IsInpOutDriverOpen = unsafe extern "system" fn() -> i32;

pub trait Interface {
    fn read_port_byte(&self, port_number: u16) -> u8;
    fn write_port_byte(&self, port_number: u16, value: u8);
}

impl Interface for crate::Inpout {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn read_port_byte(&self, port_number: u16) -> u8 {
        // Inp32 widens a byte-sized IN to a short:
        unsafe { (self.inp32)(port_number) as u8 }
    }

    #[inline]
    fn write_port_byte(&self, port_number: u16, value: u8) {
        unsafe { (self.out32)(port_number, u16::from(value)) };
    }
}
