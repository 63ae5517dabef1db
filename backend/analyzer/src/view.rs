use scores::{
    TraitScores, display_score, overall_score,
    style::{TraitStyle, style_for},
};

/// Everything the results section draws, derived from the current scores.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub ring: Ring,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub overall: f64,
}

impl Ring {
    /// Filled arc, 0-100 mapped onto 0-360. Not clamped.
    pub fn degrees(&self) -> f64 {
        self.overall * 3.6
    }

    pub fn label(&self) -> String {
        format!("{}%", display_score(self.overall))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: String,
    pub value: f64,
    pub style: TraitStyle,
}

impl Bar {
    /// Doubles as the CSS fill width. Not clamped.
    pub fn label(&self) -> String {
        format!("{}%", display_score(self.value))
    }
}

pub fn render(scores: &TraitScores) -> View {
    let bars = scores
        .iter()
        .map(|(name, &value)| Bar {
            name: name.clone(),
            value,
            style: style_for(name),
        })
        .collect();

    View {
        ring: Ring {
            overall: overall_score(scores),
        },
        bars,
    }
}
