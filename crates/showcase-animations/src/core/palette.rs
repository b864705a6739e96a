//! Fixed color palette with seeded uniform selection.

/// The palette used by random color picks and the rainbow cycle
pub const COLORS: [&str; 7] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#f0932b", "#eb4d4b", "#6c5ce7",
];

/// Deterministic seed for reproducible color draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw seed value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Simple xorshift64 PRNG
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator; a zero seed is bumped to one
    #[must_use]
    pub const fn new(seed: Seed) -> Self {
        let state = if seed.0 == 0 { 1 } else { seed.0 };
        Self { state }
    }

    /// Next raw value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform index in `0..len`; returns 0 when `len` is 0
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

/// Ordered, fixed set of colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    colors: &'static [&'static str],
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::standard()
    }
}

impl ColorPalette {
    /// The seven-color showcase palette
    #[must_use]
    pub const fn standard() -> Self {
        Self { colors: &COLORS }
    }

    /// All colors in order
    #[must_use]
    pub const fn colors(&self) -> &'static [&'static str] {
        self.colors
    }

    /// Number of colors
    #[must_use]
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index mod len`
    #[must_use]
    pub fn cycle(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }

    /// Uniformly random color
    pub fn pick(&self, rng: &mut Xorshift64) -> &'static str {
        self.colors[rng.next_index(self.colors.len())]
    }

    /// Whether `color` belongs to the palette
    #[must_use]
    pub fn contains(&self, color: &str) -> bool {
        self.colors.contains(&color)
    }
}
