//! CV page content and its rendering inside the main scroll area.

use super::motion::{SectionSpan, TimelineEntry};
use eframe::egui;

pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const HERO_TAGLINE: &str = "AI Engineer · Data Scientist · Software Engineer";

pub const SECTIONS: &[Section] = &[
    Section {
        id: "home",
        title: "Home",
        lines: &[
            "Dublin, Ireland",
            "Building conversational AI, RAG systems and production ML.",
        ],
    },
    Section {
        id: "about",
        title: "About",
        lines: &[
            "7.5+ years across AI engineering, data science and software development.",
            "I like turning research ideas into systems people actually use, and teaching others along the way.",
        ],
    },
    Section {
        id: "experience",
        title: "Experience",
        lines: &["Click a role to see what it involved."],
    },
    Section {
        id: "skills",
        title: "Skills",
        lines: &[
            "Languages: Python, SQL, JavaScript",
            "ML & AI: TensorFlow, PyTorch, LangGraph, scikit-learn, YOLO V5",
            "Cloud & Ops: AWS, Docker, OpenSearch",
        ],
    },
    Section {
        id: "projects",
        title: "Projects",
        lines: &[
            "Empathy prediction from eye-tracking data (89% accuracy)",
            "Free Canvas: AR drawing tool for children",
            "Agentic chatbot assistant",
            "Snake game driven by a Random Forest",
        ],
    },
    Section {
        id: "education",
        title: "Education",
        lines: &[
            "MSc Data Analytics · National College of Ireland (First Class Honours, Dean's List)",
            "BE Mechanical Engineering · University of Pune (First Class with Distinction)",
        ],
    },
    Section {
        id: "contact",
        title: "Contact",
        lines: &[
            "akshaysayar@gmail.com",
            "+353 89 966 6388",
            "LinkedIn · GitHub",
        ],
    },
];

const JOBS: &[(&str, &[&str])] = &[
    (
        "Software Engineer · Propylon, Dublin (Nov 2022 – Jul 2025)",
        &[
            "Conversational RAG with LangGraph and Claude Sonnet.",
            "Custom OpenSearch indexing for legislative documents.",
            "Mentoring Trinity College students.",
        ],
    ),
    (
        "Senior Software Engineer · GS Lab",
        &["Network security analytics and ML-driven intrusion detection."],
    ),
    (
        "Programmer Analyst · Cognizant",
        &["Data science solutions and reporting pipelines."],
    ),
];

/// Experience entries, all collapsed.
pub fn timeline() -> Vec<TimelineEntry> {
    JOBS.iter()
        .map(|&(header, details)| TimelineEntry::new(header, details))
        .collect()
}

fn draw_timeline(ui: &mut egui::Ui, entries: &mut [TimelineEntry]) {
    for entry in entries {
        let marker = if entry.is_expanded() { "▼" } else { "▶" };
        // Buttons take Enter/Space when focused, so the keyboard toggles too.
        let header = ui.selectable_label(
            entry.is_expanded(),
            egui::RichText::new(format!("{marker} {}", entry.header)).strong(),
        );
        if header.clicked() {
            entry.toggle();
            log::debug!("Timeline `{}` expanded={}", entry.header, entry.is_expanded());
        }
        if entry.is_expanded() {
            ui.indent(entry.header, |ui| {
                for detail in entry.details {
                    ui.label(format!("• {detail}"));
                }
            });
        }
        ui.add_space(4.0);
    }
}

/// Draws every section and reports where each one landed, relative to the
/// top of the scroll content.
pub fn draw_sections(
    ui: &mut egui::Ui,
    hero_name: &str,
    timeline: &mut [TimelineEntry],
) -> Vec<SectionSpan> {
    let origin = ui.cursor().top();
    let mut spans = Vec::with_capacity(SECTIONS.len());

    for (index, section) in SECTIONS.iter().enumerate() {
        let top = ui.cursor().top();

        if index == 0 {
            ui.add_space(60.0);
            // Keep the line height stable while the name is still typing.
            ui.label(egui::RichText::new(format!("{hero_name}\u{200b}")).size(40.0).strong());
            ui.label(egui::RichText::new(HERO_TAGLINE).size(18.0));
        } else {
            ui.add_space(24.0);
            ui.heading(section.title);
            ui.separator();
        }

        for line in section.lines {
            ui.label(*line);
        }
        if section.id == "experience" {
            draw_timeline(ui, timeline);
        }
        ui.add_space(if index == 0 { 240.0 } else { 120.0 });

        let bottom = ui.cursor().top();
        spans.push(SectionSpan {
            top: top - origin,
            height: bottom - top,
        });
    }

    spans
}
