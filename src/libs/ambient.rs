// Light sensor readings to UI background buckets.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum BrightnessLevel {
    PitchBlack,
    Dark,
    Grey,
    Normal,
    Bright,
    VeryBright,
}

impl BrightnessLevel {
    /// Readings are truncated to whole lux first. NaN and negative values
    /// count as pitch black.
    pub fn from_lux(lux: f32) -> Self {
        let whole = if lux.is_nan() { 0 } else { lux as i64 };
        match whole {
            i64::MIN..=0 => BrightnessLevel::PitchBlack,
            1..=10 => BrightnessLevel::Dark,
            11..=50 => BrightnessLevel::Grey,
            51..=5000 => BrightnessLevel::Normal,
            5001..=25000 => BrightnessLevel::Bright,
            _ => BrightnessLevel::VeryBright,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BrightnessLevel::PitchBlack => "Pitch black",
            BrightnessLevel::Dark => "Dark",
            BrightnessLevel::Grey => "Grey",
            BrightnessLevel::Normal => "Basic",
            BrightnessLevel::Bright => "Bright",
            BrightnessLevel::VeryBright => "Too bright",
        }
    }
}

pub fn brightness_header(lux: f32) -> String {
    format!("Brightness: {:.1} lux {}", lux, BrightnessLevel::from_lux(lux).label())
}
