//! MDT glass push button II (`GT2`)
//!
//! The communication object texts of a GT2 name the button they belong to
//! (`T1: Light`, `T3/4 lang: Blinds`, ...). A panel shows three rows of two
//! buttons; buttons T1 to T6 form the first page, T7 to T12 the second one.

use regex::Regex;
use tracing::info;

use knx_project::Device;

use super::{repeat, BORDER, HSEP, VSEP, WIDTH};
use crate::error::{DeviceError, Result};
use crate::vendor::Switch;

/// Button numbers of the six rows, page one first
const BUTTON_ROWS: [&str; 6] = [
    "T1|T2|T1/2",
    "T3|T4|T3/4",
    "T5|T6|T5/6",
    "T7|T8|T7/8",
    "T9|T10|T9/10",
    "T11|T12|T11/12",
];

/// Rows shown on one page
const ROWS_PER_PAGE: usize = 3;

const DESCRIPTION_SEPARATOR: &str = "     ";
const BUTTON_SPACE: &str = "    ";

#[derive(Debug, Clone)]
struct TextPatterns {
    rows: Vec<Regex>,
    status: Regex,
    led: Regex,
}

impl TextPatterns {
    fn compile() -> Result<Self> {
        let rows = BUTTON_ROWS
            .iter()
            .map(|buttons| {
                Regex::new(&format!(
                    r"^(?P<nr>{})(\s?(?P<duration>kurz|lang))?:\s(?P<description>.*)$",
                    buttons
                ))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            status: Regex::new(r"^(?P<description>(Statustext|Statuswert|Meldung)\s.+)$")?,
            led: Regex::new(r"^(?P<description>Status LED)$")?,
        })
    }
}

/// Texts of a glass push button sorted into pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelLayout {
    /// Three row labels per page
    pub pages: Vec<[String; ROWS_PER_PAGE]>,
    /// Status text and message descriptions
    pub status: String,
    /// `Status LED` if LED feedback is configured
    pub led: String,
}

/// An MDT glass push button II
#[derive(Debug, Clone)]
pub struct GlassPushButton {
    device: Device,
    patterns: TextPatterns,
}

impl GlassPushButton {
    pub fn new(device: Device) -> Result<Self> {
        Ok(Self {
            device,
            patterns: TextPatterns::compile()?,
        })
    }

    /// Sort the device texts into pages.
    ///
    /// Identical texts count once. Matching texts of one row are joined with
    /// five spaces.
    ///
    /// # Errors
    ///
    /// Texts that match neither a button row nor a status or LED pattern fail
    /// with `DeviceError::UnconsumedTexts`.
    pub fn layout(&self) -> Result<PanelLayout> {
        let mut remaining: Vec<&str> = Vec::new();
        for text in &self.device.texts {
            if !remaining.contains(&text.as_str()) {
                remaining.push(text);
            }
        }

        let rows: Vec<String> = self
            .patterns
            .rows
            .iter()
            .map(|pattern| take_matches(&mut remaining, pattern))
            .collect();

        let status = take_matches(&mut remaining, &self.patterns.status);
        if !status.is_empty() {
            info!("{} has statustext/warnings activated.", self.device.name);
        }
        let led = take_matches(&mut remaining, &self.patterns.led);
        if !led.is_empty() {
            info!("{} has led feedback activated.", self.device.name);
        }

        if !remaining.is_empty() {
            return Err(DeviceError::UnconsumedTexts {
                device: self.device.name.clone(),
                texts: remaining.into_iter().map(str::to_string).collect(),
            });
        }

        // Trailing pages without any label are dropped
        let page_count = rows
            .chunks(ROWS_PER_PAGE)
            .rposition(|page| page.iter().any(|label| !label.is_empty()))
            .map_or(0, |last| last + 1);

        let pages = rows
            .chunks(ROWS_PER_PAGE)
            .take(page_count)
            .map(|page| [page[0].clone(), page[1].clone(), page[2].clone()])
            .collect();

        Ok(PanelLayout { pages, status, led })
    }
}

impl Switch for GlassPushButton {
    fn device(&self) -> &Device {
        &self.device
    }

    fn render(&self) -> Result<String> {
        let layout = self.layout()?;

        let button_l = format!("{}{}{} ", VSEP, BUTTON_SPACE, VSEP);
        let button_r = format!(" {}{}{}", VSEP, BUTTON_SPACE, VSEP);
        let total = WIDTH + button_l.len() + button_r.len();
        let hline = repeat(BORDER, total);
        let hline_small = repeat(HSEP, total);

        let page_count = layout.pages.len();
        let pages: Vec<String> = layout
            .pages
            .iter()
            .enumerate()
            .map(|(i, rows)| {
                let mut lines = vec![
                    format!("{} {}/{}", self.device.name, i + 1, page_count),
                    hline.clone(),
                ];
                for (r, label) in rows.iter().enumerate() {
                    if r > 0 {
                        lines.push(hline_small.clone());
                    }
                    lines.push(format!("{}{:^width$}{}", button_l, label, button_r, width = WIDTH));
                }
                lines.push(hline.clone());
                lines.join("\n")
            })
            .collect();

        Ok(pages.join("\n\n"))
    }
}

/// Remove all texts matching `pattern` and join their descriptions
fn take_matches(remaining: &mut Vec<&str>, pattern: &Regex) -> String {
    let mut descriptions = Vec::new();
    remaining.retain(|text| match pattern.captures(text) {
        Some(captures) => {
            if let Some(description) = captures.name("description") {
                descriptions.push(description.as_str().trim().to_string());
            }
            false
        }
        None => true,
    });
    descriptions.join(DESCRIPTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knx_project::{Area, Line};
    use rstest::rstest;
    use std::sync::Arc;

    fn panel(texts: &[&str]) -> GlassPushButton {
        let line = Arc::new(Line {
            id: "L-1".to_string(),
            name: "Line".to_string(),
            address: 1,
            area: Arc::new(Area {
                id: "A-1".to_string(),
                name: "Area".to_string(),
                address: 1,
            }),
            medium: "MT-0".to_string(),
        });
        GlassPushButton::new(Device {
            id: "D-1".to_string(),
            name: "Kitchen".to_string(),
            address: 3,
            line,
            product_id: "M-0083_H-GT2".to_string(),
            group_address_ids: Vec::new(),
            texts: texts.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    #[rstest]
    #[case("T1: Light", 0, "Light")]
    #[case("T2 kurz: Light", 0, "Light")]
    #[case("T1/2 lang: Dimmer", 0, "Dimmer")]
    #[case("T3: Blinds", 1, "Blinds")]
    #[case("T5lang: Scene", 2, "Scene")]
    fn test_first_page_rows(#[case] text: &str, #[case] row: usize, #[case] expected: &str) {
        let layout = panel(&[text]).layout().unwrap();
        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0][row], expected);
    }

    #[test]
    fn test_second_page() {
        let layout = panel(&["T1: Light", "T10: Heating", "T11/12: All off"])
            .layout()
            .unwrap();
        assert_eq!(layout.pages.len(), 2);
        assert_eq!(layout.pages[0], ["Light".to_string(), String::new(), String::new()]);
        assert_eq!(
            layout.pages[1],
            [String::new(), "Heating".to_string(), "All off".to_string()]
        );
    }

    #[test]
    fn test_row_joins_descriptions() {
        let layout = panel(&["T1: Light", "T2: Dimmer", "T1: Light"]).layout().unwrap();
        assert_eq!(layout.pages[0][0], "Light     Dimmer");
    }

    #[test]
    fn test_status_and_led() {
        let layout = panel(&["T1: Light", "Statustext Window open", "Status LED"])
            .layout()
            .unwrap();
        assert_eq!(layout.status, "Statustext Window open");
        assert_eq!(layout.led, "Status LED");
    }

    #[test]
    fn test_unconsumed_text() {
        match panel(&["T1: Light", "Temperature"]).layout() {
            Err(DeviceError::UnconsumedTexts { device, texts }) => {
                assert_eq!(device, "Kitchen");
                assert_eq!(texts, vec!["Temperature"]);
            }
            other => panic!("Expected UnconsumedTexts, got {:?}", other),
        }
    }

    #[test]
    fn test_render_page() {
        let rendered = panel(&["T1: Light", "T3: Blinds", "T5: Scene"]).render().unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Kitchen 1/1");
        assert_eq!(lines[1], "=".repeat(64));
        assert_eq!(
            lines[2],
            format!("|    | {}Light{} |    |", " ".repeat(22), " ".repeat(23))
        );
        assert_eq!(lines[3], "-".repeat(64));
        assert!(lines[4].contains("Blinds"));
        assert!(lines[6].contains("Scene"));
        assert_eq!(lines[7], "=".repeat(64));
        assert!(lines.iter().skip(1).all(|line| line.chars().count() == 64));
    }

    #[test]
    fn test_render_without_buttons() {
        assert_eq!(panel(&[]).render().unwrap(), "");
    }
}
