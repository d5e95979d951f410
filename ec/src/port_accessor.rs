pub trait PortAccessor {
    fn read_byte(&self, port_number: u16) -> Option<u8>;
    fn write_byte(&self, port_number: u16, value: u8) -> bool;
}

impl<T: PortAccessor + ?Sized> PortAccessor for &T {
    fn read_byte(&self, port_number: u16) -> Option<u8> {
        (**self).read_byte(port_number)
    }

    fn write_byte(&self, port_number: u16, value: u8) -> bool {
        (**self).write_byte(port_number, value)
    }
}
