/// Represents a per-vertex color in RGBA format.
///
/// Each channel is an 8-bit unsigned integer. Vertex data stores the color packed into a
/// single `u32` (see [`Color::pack`]), which is what the reuse check compares against.
///
/// # Examples
///
/// ```
/// use quadstate::Color;
///
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red.to_array(), [255, 0, 0, 255]);
///
/// // Opaque white packs to all bits set
/// assert_eq!(Color::WHITE.pack(), 0xFFFF_FFFF);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// A transparent color.
    ///
    /// All color channels are set to zero, making the color fully transparent.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    /// A black color.
    ///
    /// Red, green, and blue channels are set to zero, and alpha is fully opaque.
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    /// A white color.
    ///
    /// All channels are fully saturated. Quads drawn with this color leave the source
    /// texture untouched.
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    /// Creates a new color with the specified RGB values and full opacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadstate::Color;
    ///
    /// let green = Color::rgb(0, 255, 0);
    /// assert_eq!(green, Color([0, 255, 0, 255]));
    /// ```
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Creates a new color with the specified RGBA values.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Packs the channels into a `u32` with red in the lowest byte, matching the byte
    /// order the vertex buffer is read with.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadstate::Color;
    ///
    /// assert_eq!(Color::rgba(1, 2, 3, 4).pack(), 0x0403_0201);
    /// ```
    pub fn pack(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Returns the color as an array of 4 `u8` values.
    pub fn to_array(&self) -> [u8; 4] {
        self.0
    }
}
