/// How a trait bar gets painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitStyle {
    /// CSS background for the bar fill.
    pub gradient: &'static str,
    /// Terminal color name for the bar fill.
    pub color: &'static str,
}

pub const DEFAULT_STYLE: TraitStyle = TraitStyle {
    gradient: "linear-gradient(90deg,#6366f1,#22d3ee)",
    color: "cyan",
};

/// Ring fill and track colors.
pub const RING_FILL: &str = "#4f46e5";
pub const RING_TRACK: &str = "#e5e7eb";

/// Looks up the style of a known trait, anything else gets [`DEFAULT_STYLE`].
pub fn style_for(trait_name: &str) -> TraitStyle {
    let (gradient, color) = match trait_name {
        "confidence" => ("linear-gradient(90deg,#4f46e5,#818cf8)", "blue"),
        "dominance" => ("linear-gradient(90deg,#dc2626,#f87171)", "red"),
        "attractiveness" => ("linear-gradient(90deg,#ec4899,#f9a8d4)", "magenta"),
        "style" => ("linear-gradient(90deg,#0ea5e9,#38bdf8)", "cyan"),
        "sharpness" => ("linear-gradient(90deg,#22c55e,#86efac)", "green"),
        "clarity" => ("linear-gradient(90deg,#f59e0b,#fde68a)", "yellow"),
        "attitude" => ("linear-gradient(90deg,#7c3aed,#c4b5fd)", "magenta"),
        _ => return DEFAULT_STYLE,
    };

    TraitStyle { gradient, color }
}
