use palette::{Mix, Srgba};

/// An sRGB color with an alpha channel, components in `[0, 1]`.
///
/// Unpremultiplied by convention.
pub type Tint = Srgba;

pub fn white() -> Tint {
    Srgba::new(1., 1., 1., 1.)
}

pub fn black() -> Tint {
    Srgba::new(0., 0., 0., 1.)
}

/// Fully transparent white, so gradients toward it don't darken.
pub fn transparent() -> Tint {
    Srgba::new(1., 1., 1., 0.)
}

/// Creates a tint from 8-bit RGBA components.
pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Tint {
    Srgba::<u8>::new(r, g, b, a).into_format()
}

/// Gets the tint as 8-bit components in RGBA order.
pub fn to_rgba8(tint: Tint) -> [u8; 4] {
    let c: Srgba<u8> = tint.into_format();
    [c.red, c.green, c.blue, c.alpha]
}

/// Returns `tint` with its alpha replaced.
pub fn with_alpha(tint: Tint, alpha: f32) -> Tint {
    Srgba::new(tint.red, tint.green, tint.blue, alpha)
}

/// Mixes two tints in linear RGB.
///
/// `factor` 0 yields `a`, 1 yields `b`.
pub fn mix(a: Tint, b: Tint, factor: f32) -> Tint {
    let mixed = a.into_linear().mix(&b.into_linear(), factor);
    Srgba::from_linear(mixed)
}

/// Formats a tint as `#rrggbb`, or `#rrggbbaa` if not fully opaque.
pub fn to_hex(tint: Tint) -> String {
    let [r, g, b, a] = to_rgba8(tint);
    if a == u8::MAX {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}
