//! Single page rendering of the analyzer state.

use std::fmt;

use askama_escape::{Html, escape};
use scores::style::{RING_FILL, RING_TRACK};

use crate::{
    state::{AnalyzerState, IMAGE_FIELD},
    view::{View, render},
};

pub const TITLE: &str = "AI Personality Visual Analyzer";
pub const SUBMIT_LABEL: &str = "Analyze Personality";
pub const LOADING_LABEL: &str = "Analyzing...";

const STYLE: &str = r#"
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            min-height: 100vh;
            background: linear-gradient(135deg, #f3f4f6, #d1d5db);
            padding: 2rem 1rem;
        }
        .card {
            max-width: 36rem;
            margin: 0 auto;
            background: #fff;
            border-radius: 1.5rem;
            box-shadow: 0 25px 50px -12px rgba(0,0,0,0.25);
            padding: 2rem;
        }
        h1 { font-size: 1.875rem; font-weight: 800; color: #111827; text-align: center; margin-bottom: 1.5rem; }
        .preview { display: flex; justify-content: center; margin-bottom: 1.5rem; animation: fadeIn 0.5s ease-out; }
        .preview img { width: 8rem; height: 8rem; border-radius: 9999px; object-fit: cover; border: 4px solid #d1d5db; }
        form { text-align: center; }
        form > * + * { margin-top: 1.25rem; }
        .choose { display: inline-block; cursor: pointer; background: #111827; color: #fff; padding: 0.5rem 1.5rem; border-radius: 9999px; }
        .choose input { display: none; }
        button { background: #4f46e5; color: #fff; border: 0; padding: 0.5rem 2rem; border-radius: 9999px; font-size: 1rem; cursor: pointer; }
        button:hover { background: #4338ca; transform: scale(1.05); }
        .results { margin-top: 2.5rem; animation: slideUp 0.6s ease-out; }
        .ring { position: relative; width: 10rem; height: 10rem; margin: 0 auto 2.5rem; border-radius: 9999px; display: flex; align-items: center; justify-content: center; }
        .ring-inner { width: 7rem; height: 7rem; background: #fff; border-radius: 9999px; display: flex; flex-direction: column; align-items: center; justify-content: center; box-shadow: 0 10px 15px rgba(0,0,0,0.1); }
        .ring-value { font-size: 1.875rem; font-weight: 800; color: #111827; }
        .ring-label { font-size: 0.75rem; color: #4b5563; }
        .trait + .trait { margin-top: 1.25rem; }
        .trait-head { display: flex; justify-content: space-between; margin-bottom: 0.25rem; }
        .trait-name { text-transform: capitalize; font-weight: 600; color: #111827; }
        .trait-value { font-size: 0.875rem; font-weight: 700; color: #1f2937; }
        .track { width: 100%; background: #e5e7eb; border-radius: 9999px; height: 0.75rem; overflow: hidden; }
        .fill { height: 0.75rem; border-radius: 9999px; animation: grow 1s ease-out; }
        footer { font-size: 0.75rem; color: #4b5563; text-align: center; margin-top: 2.5rem; }
        @keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }
        @keyframes slideUp { from { opacity: 0; transform: translateY(1rem); } to { opacity: 1; transform: none; } }
        @keyframes grow { from { width: 0; } }
"#;

/// The whole page for one analyzer state. `endpoint` is where the form posts to.
pub struct Page<'a> {
    pub state: &'a AnalyzerState,
    pub endpoint: &'a str,
}

pub fn render_page(state: &AnalyzerState, endpoint: &str) -> String {
    Page { state, endpoint }.to_string()
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            out,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{TITLE}</title>
    <style>{STYLE}</style>
</head>
<body>
<main class="card">
    <h1>{TITLE}</h1>
"#
        )?;

        if let Some(preview) = &self.state.image_preview {
            writeln!(
                out,
                r#"    <div class="preview"><img src="{}" alt="Selected image"></div>"#,
                escape(preview, Html)
            )?;
        }

        let label = if self.state.loading { LOADING_LABEL } else { SUBMIT_LABEL };
        write!(
            out,
            r#"    <form action="{}" method="post" enctype="multipart/form-data">
        <label class="choose">Choose Image
            <input type="file" name="{IMAGE_FIELD}" accept="image/*" required>
        </label>
        <div><button type="submit">{label}</button></div>
    </form>
"#,
            escape(self.endpoint, Html)
        )?;

        if let Some(scores) = &self.state.scores {
            write_results(out, &render(scores))?;
        }

        write!(
            out,
            r#"    <footer>AI-based visual personality estimation. Not a psychological diagnosis.</footer>
</main>
</body>
</html>
"#
        )
    }
}

fn write_results(out: &mut fmt::Formatter<'_>, view: &View) -> fmt::Result {
    writeln!(out, r#"    <section class="results">"#)?;

    write!(
        out,
        r#"        <div class="ring" style="background: conic-gradient({RING_FILL} {}deg, {RING_TRACK} 0deg);">
            <div class="ring-inner">
                <p class="ring-value">{}</p>
                <p class="ring-label">Overall Score</p>
            </div>
        </div>
"#,
        view.ring.degrees(),
        view.ring.label()
    )?;

    for bar in &view.bars {
        let label = bar.label();
        write!(
            out,
            r#"        <div class="trait">
            <div class="trait-head"><span class="trait-name">{}</span><span class="trait-value">{label}</span></div>
            <div class="track"><div class="fill" style="width: {label}; background: {};"></div></div>
        </div>
"#,
            escape(&bar.name, Html),
            bar.style.gradient
        )?;
    }

    writeln!(out, "    </section>")
}

#[cfg(test)]
mod tests {
    use scores::{TraitScores, format_scores};
    use serde_json::json;

    use super::*;

    fn displayed(scores: TraitScores) -> AnalyzerState {
        AnalyzerState {
            scores: Some(scores),
            ..AnalyzerState::default()
        }
    }

    #[test]
    fn test_idle_page() {
        let page = render_page(&AnalyzerState::default(), "https://example.com/predict");

        assert!(page.contains(r#"<form action="https://example.com/predict""#));
        assert!(page.contains(r#"name="image" accept="image/*" required"#));
        assert!(page.contains(SUBMIT_LABEL));
        assert!(!page.contains("class=\"preview\""));
        assert!(!page.contains("Overall Score"));
    }

    #[test]
    fn test_loading_label() {
        let state = AnalyzerState {
            loading: true,
            ..AnalyzerState::default()
        };

        assert!(render_page(&state, "/predict").contains(LOADING_LABEL));
    }

    #[test]
    fn test_preview() {
        let state = AnalyzerState {
            image_preview: Some("data:image/png;base64,AAAA".to_string()),
            ..AnalyzerState::default()
        };

        assert!(render_page(&state, "/predict").contains(r#"<img src="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn test_results() {
        let scores = format_scores(&json!({ "scores": { "confidence": 87.6, "dominance": 42.1 } }));
        let page = render_page(&displayed(scores), "/predict");

        assert!(page.contains("conic-gradient(#4f46e5 234deg, #e5e7eb 0deg)"));
        assert!(page.contains(r#"<p class="ring-value">65%</p>"#));
        assert!(page.contains("width: 88%; background: linear-gradient(90deg,#4f46e5,#818cf8);"));
        assert!(page.contains("width: 42%; background: linear-gradient(90deg,#dc2626,#f87171);"));

        let confidence = page.find(">confidence<").unwrap();
        let dominance = page.find(">dominance<").unwrap();
        assert!(confidence < dominance);
    }

    #[test]
    fn test_empty_results() {
        let page = render_page(&displayed(TraitScores::new()), "/predict");

        assert!(page.contains(r#"<p class="ring-value">0%</p>"#));
        assert!(page.contains("conic-gradient(#4f46e5 0deg"));
        assert!(!page.contains("class=\"trait\""));
    }

    #[test]
    fn test_unclamped_width() {
        let scores = format_scores(&json!({ "scores": { "charisma": 130 } }));
        let page = render_page(&displayed(scores), "/predict");

        assert!(page.contains("width: 130%; background: linear-gradient(90deg,#6366f1,#22d3ee);"));
    }

    #[test]
    fn test_escapes_trait_names() {
        let scores = format_scores(&json!({ "scores": { "<b>bold</b>": 10 } }));
        let page = render_page(&displayed(scores), "/predict");

        assert!(page.contains(r#"<span class="trait-name">&lt;b&gt;bold&lt;"#));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn test_escapes_endpoint() {
        let page = render_page(&AnalyzerState::default(), r#"/predict?a=1&b="2""#);

        assert!(page.contains(r#"<form action="/predict?a=1&amp;b=&quot;2&quot;""#));
    }
}
