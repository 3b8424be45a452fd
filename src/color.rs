// Simple color struct, created from an unsigned 32 representing 0xRRGGBB

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // Blue used for the connection lines between nearby particles
    pub const CONNECTION: Color = Color::from_u32(0x3b82f6);

    // Particle colors, each particle picks one of these at creation
    pub const PALETTE: [Color; 5] = [
        Color::from_u32(0x3b82f6),
        Color::from_u32(0x6366f1),
        Color::from_u32(0x8b5cf6),
        Color::from_u32(0x0ea5e9),
        Color::from_u32(0xffffff),
    ];

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    /// CSS `rgba()` string for this color at the given alpha.
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}
