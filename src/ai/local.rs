use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which wording of the canned answers to use.
///
/// `Hosted` goes with the server-backed deployment, `Static` with the fully
/// offline one. Both share the same keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Hosted,
    Static,
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hosted" | "server" => Ok(Preset::Hosted),
            "static" | "offline" => Ok(Preset::Static),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Hosted => f.write_str("hosted"),
            Preset::Static => f.write_str("static"),
        }
    }
}

/// One row of the matcher table: any keyword hit selects `response`.
#[derive(Debug, Clone)]
pub struct Rule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|word| lowered.contains(word))
    }
}

const EXPERIENCE: &[&str] = &["experience", "work"];
const SKILLS: &[&str] = &["skill", "technology"];
const PROJECTS: &[&str] = &["project", "portfolio"];
const CONTACT: &[&str] = &["contact", "reach", "hire"];
const EDUCATION: &[&str] = &["education", "study"];
const GREETING: &[&str] = &["hello", "hi", "hey"];
const CURRENT_JOB: &[&str] = &["propylon", "current", "job"];
const AI_ML: &[&str] = &["ai", "machine learning", "ml"];

/// Local AI answering from a fixed, ordered keyword table.
///
/// The first matching rule wins; rules overlap on purpose (e.g. "hi" is a
/// substring of many words), so order is part of the contract.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    rules: Vec<Rule>,
    default_response: &'static str,
}

impl KeywordMatcher {
    pub fn new(preset: Preset) -> Self {
        let (rules, default_response) = match preset {
            Preset::Hosted => (hosted_rules(), HOSTED_DEFAULT),
            Preset::Static => (static_rules(), STATIC_DEFAULT),
        };
        Self {
            rules,
            default_response,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_response(&self) -> &'static str {
        self.default_response
    }

    /// Picks the canned answer for `message`. Pure and case-insensitive.
    pub fn classify(&self, message: &str) -> String {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.response)
            .unwrap_or(self.default_response)
            .to_string()
    }
}

const HOSTED_DEFAULT: &str = "I'm here to help you learn more about Akshay Sayar! You can ask me about his experience, skills, projects, education, or how to contact him. Try asking about his work at Propylon, his AI projects, or his technical expertise.";

const STATIC_DEFAULT: &str = "I can tell you about Akshay Sayar's experience, skills, projects, education and contact details. Try a question like \"What projects has he built?\" or \"How can I reach him?\"";

fn hosted_rules() -> Vec<Rule> {
    vec![
        Rule {
            topic: "experience",
            keywords: EXPERIENCE,
            response: "Akshay has 7.5+ years of experience in AI, data science, and software engineering. He's currently working as a Software Engineer at Propylon in Dublin, Ireland, where he develops conversational RAG systems using LangGraph and Claude Sonnet LLM. Previously, he worked at companies like GS Lab and Cognizant, focusing on AI/ML projects, network security, and data science solutions.",
        },
        Rule {
            topic: "skills",
            keywords: SKILLS,
            response: "Akshay is proficient in Python, TensorFlow, PyTorch, LangGraph, AWS, Docker, and many other AI/ML technologies. He specializes in building RAG systems, computer vision, NLP, and cloud deployments. Check out the Skills section above to see his complete technical expertise.",
        },
        Rule {
            topic: "projects",
            keywords: PROJECTS,
            response: "Akshay has worked on fascinating projects including: ML Framework for Empathy Prediction using eye-tracking (89% accuracy), Free Canvas AR Drawing Tool for children, Agentic Chatbot Assistant, and a Snake Game with Random Forest AI. He's also built production RAG systems and network intrusion detection systems.",
        },
        Rule {
            topic: "contact",
            keywords: CONTACT,
            response: "You can reach Akshay at akshaysayar@gmail.com or call +353 89 966 6388. He's based in Dublin, Ireland and is open to discussing AI projects, collaborations, and opportunities. You can also connect with him on LinkedIn or GitHub.",
        },
        Rule {
            topic: "education",
            keywords: EDUCATION,
            response: "Akshay has a Master of Science in Data Analytics from National College of Ireland (First Class Honors, Dean's List) and a Bachelor of Engineering in Mechanical Engineering from University of Pune (First Class with Distinction). He's a continuous learner who stays updated with the latest AI and technology trends.",
        },
        Rule {
            topic: "greeting",
            keywords: GREETING,
            response: "Hello! I'm Akshay's AI assistant. I can help you learn more about his 7.5+ years of experience in AI engineering, data science, and software development. Feel free to ask about his work at Propylon, his AI projects, technical skills, or how to get in touch!",
        },
        Rule {
            topic: "current-job",
            keywords: CURRENT_JOB,
            response: "Akshay currently works as a Software Engineer at Propylon in Dublin, Ireland (Nov 2022 - July 2025). He develops conversational RAG systems using LangGraph and Claude Sonnet LLM, designs custom indexing algorithms with OpenSearch, and has mentored Trinity College students for 3 years. He also volunteers teaching programming to children.",
        },
        Rule {
            topic: "ai-ml",
            keywords: AI_ML,
            response: "Akshay is an AI/ML expert with experience in building production systems like conversational RAG with LangGraph, computer vision models (YOLO V5), NLP systems, and time series forecasting. He's worked on empathy prediction using eye-tracking, network intrusion detection, and IoT anomaly detection systems.",
        },
    ]
}

/// Offline wording: a paraphrase of [`hosted_rules`] over the same keywords,
/// shorter and phrased for a page with no backend behind it.
fn static_rules() -> Vec<Rule> {
    vec![
        Rule {
            topic: "experience",
            keywords: EXPERIENCE,
            response: "Akshay brings 7.5+ years across AI engineering, data science and software development. At Propylon in Dublin he builds conversational RAG systems with LangGraph and Claude Sonnet; before that he worked at GS Lab and Cognizant on ML, network security and analytics projects. The Experience section has the full timeline.",
        },
        Rule {
            topic: "skills",
            keywords: SKILLS,
            response: "His core stack is Python, TensorFlow, PyTorch and LangGraph, deployed with AWS and Docker. He works mostly on RAG pipelines, computer vision, NLP and cloud deployments. Scroll to the Skills section for the full breakdown.",
        },
        Rule {
            topic: "projects",
            keywords: PROJECTS,
            response: "Highlights include an eye-tracking empathy prediction framework (89% accuracy), the Free Canvas AR drawing tool for children, an agentic chatbot assistant and a Snake game driven by a Random Forest. The Projects section links to each of them.",
        },
        Rule {
            topic: "contact",
            keywords: CONTACT,
            response: "Email akshaysayar@gmail.com or call +353 89 966 6388. Akshay is based in Dublin, Ireland and is happy to talk about AI projects, collaborations and roles. LinkedIn and GitHub links are in the Contact section.",
        },
        Rule {
            topic: "education",
            keywords: EDUCATION,
            response: "Akshay holds an MSc in Data Analytics from National College of Ireland (First Class Honours, Dean's List) and a BE in Mechanical Engineering from University of Pune (First Class with Distinction).",
        },
        Rule {
            topic: "greeting",
            keywords: GREETING,
            response: "Hi there! I'm the assistant on Akshay's CV page. Ask me about his experience, his current role at Propylon, his projects, his skills or how to get in touch.",
        },
        Rule {
            topic: "current-job",
            keywords: CURRENT_JOB,
            response: "Akshay is a Software Engineer at Propylon in Dublin (Nov 2022 - July 2025), building conversational RAG with LangGraph and Claude Sonnet and custom OpenSearch indexing. He has also mentored Trinity College students for 3 years and volunteers teaching programming to children.",
        },
        Rule {
            topic: "ai-ml",
            keywords: AI_ML,
            response: "On the AI/ML side Akshay has shipped conversational RAG, YOLO V5 computer vision models, NLP systems and time series forecasting, plus research on eye-tracking empathy prediction, network intrusion detection and IoT anomaly detection.",
        },
    ]
}
