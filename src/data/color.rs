use iced::Color;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Stable 24-bit colour derived from a series name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesColor(u32);

impl SeriesColor {
    pub fn for_name(name: &str) -> Self {
        let hash = name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        });
        Self((hash ^ (hash >> 24)) & 0x00ff_ffff)
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    pub fn hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl From<SeriesColor> for Color {
    fn from(color: SeriesColor) -> Self {
        let (r, g, b) = color.rgb();
        Color::from_rgb8(r, g, b)
    }
}
