//! The four resume templates. Each is a pure function of the document.
//!
//! Section order and presentation:
//! - modern: summary, experience, education, skills (tags), projects
//! - professional: same order, uppercase headings, bulleted skills, italic tech
//! - minimal: short plain headings, skills as one comma-joined line
//! - creative: sidebar (contact, skills with stars, education), then summary,
//!   experience and projects with split technology tags

use serde::Serialize;

use super::{Block, EntryBlock};
use crate::models::{PersonalInfo, ResumeDocument, TemplateChoice};

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateChoice,
    pub name: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 4],
}

pub fn catalog() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            id: TemplateChoice::Modern,
            name: "Modern",
            description: "Clean, contemporary design with subtle accents",
            features: [
                "Clean layout",
                "Professional typography",
                "Subtle color accents",
                "Good for most industries",
            ],
        },
        TemplateInfo {
            id: TemplateChoice::Professional,
            name: "Professional",
            description: "Traditional layout ideal for corporate environments",
            features: [
                "Traditional format",
                "Formal structure",
                "ATS-optimized",
                "Ideal for corporate roles",
            ],
        },
        TemplateInfo {
            id: TemplateChoice::Minimal,
            name: "Minimal",
            description: "Elegant simplicity with focus on content",
            features: [
                "Minimalist design",
                "Content-focused",
                "Typographic hierarchy",
                "Works for any position",
            ],
        },
        TemplateInfo {
            id: TemplateChoice::Creative,
            name: "Creative",
            description: "Bold design for creative industries",
            features: [
                "Two-column layout",
                "Visual emphasis",
                "Colorful accents",
                "Perfect for creative roles",
            ],
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum LinkStyle {
    /// Show the URL without scheme or profile-site prefix.
    Handle,
    /// Show "LinkedIn" / "GitHub" labels.
    Label,
}

#[derive(Clone, Copy)]
enum AddressStyle {
    Full,
    CityState,
}

fn strip_scheme(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_prefix("www.").unwrap_or(rest)
}

fn profile_handle<'a>(url: &'a str, site: &str) -> &'a str {
    let rest = strip_scheme(url);
    rest.strip_prefix(site).unwrap_or(rest)
}

fn non_empty_join(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn contact(info: &PersonalInfo, links: LinkStyle, address: AddressStyle) -> Vec<String> {
    let mut items = Vec::new();
    for value in [&info.email, &info.phone] {
        if !value.trim().is_empty() {
            items.push(value.trim().to_string());
        }
    }
    let place = match address {
        AddressStyle::Full => {
            let parts = [
                info.address.as_str(),
                info.city.as_str(),
                info.state.as_str(),
                info.zip_code.as_str(),
            ];
            non_empty_join(&parts, ", ")
        }
        AddressStyle::CityState => non_empty_join(&[info.city.as_str(), info.state.as_str()], ", "),
    };
    if !place.is_empty() {
        items.push(place);
    }
    if !info.website.is_empty() {
        items.push(strip_scheme(&info.website).to_string());
    }
    if !info.linkedin.is_empty() {
        items.push(match links {
            LinkStyle::Handle => profile_handle(&info.linkedin, "linkedin.com/in/").to_string(),
            LinkStyle::Label => "LinkedIn".to_string(),
        });
    }
    if !info.github.is_empty() {
        items.push(match links {
            LinkStyle::Handle => profile_handle(&info.github, "github.com/").to_string(),
            LinkStyle::Label => "GitHub".to_string(),
        });
    }
    items
}

fn contact_block(blocks: &mut Vec<Block>, items: Vec<String>) {
    if !items.is_empty() {
        blocks.push(Block::Contact(items));
    }
}

fn date_range(start: &str, end: &str) -> String {
    non_empty_join(&[start, end], " – ")
}

fn header(blocks: &mut Vec<Block>, info: &PersonalInfo) {
    blocks.push(Block::Name(info.full_name()));
    if !info.title.is_empty() {
        blocks.push(Block::Title(info.title.clone()));
    }
}

fn paragraph(blocks: &mut Vec<Block>, text: &str) {
    if !text.trim().is_empty() {
        blocks.push(Block::Paragraph {
            text: text.to_string(),
            emphasis: false,
        });
    }
}

fn summary(blocks: &mut Vec<Block>, info: &PersonalInfo, heading: &str) {
    if !info.summary.trim().is_empty() {
        blocks.push(Block::Heading(heading.to_string()));
        paragraph(blocks, &info.summary);
    }
}

fn experience(blocks: &mut Vec<Block>, doc: &ResumeDocument, heading: &str) {
    if doc.experience.is_empty() {
        return;
    }
    blocks.push(Block::Heading(heading.to_string()));
    for exp in &doc.experience {
        blocks.push(Block::Entry(EntryBlock {
            title: exp.position.clone(),
            subtitle: exp.company.clone(),
            dates: date_range(&exp.start_date, exp.display_end()),
            location: exp.location.clone(),
            link: None,
        }));
        paragraph(blocks, &exp.description);
    }
}

fn education(blocks: &mut Vec<Block>, doc: &ResumeDocument, heading: &str) {
    if doc.education.is_empty() {
        return;
    }
    blocks.push(Block::Heading(heading.to_string()));
    for edu in &doc.education {
        let subtitle = match (edu.degree.trim(), edu.field_of_study.trim()) {
            ("", field) => field.to_string(),
            (degree, "") => degree.to_string(),
            (degree, field) => format!("{degree} in {field}"),
        };
        blocks.push(Block::Entry(EntryBlock {
            title: edu.school.clone(),
            subtitle,
            dates: date_range(&edu.start_date, &edu.end_date),
            location: String::new(),
            link: None,
        }));
        paragraph(blocks, &edu.description);
    }
}

#[derive(Clone, Copy)]
enum TechStyle {
    Plain,
    Italic,
    Tags,
}

fn projects(blocks: &mut Vec<Block>, doc: &ResumeDocument, heading: &str, tech: TechStyle) {
    if doc.projects.is_empty() {
        return;
    }
    blocks.push(Block::Heading(heading.to_string()));
    for project in &doc.projects {
        blocks.push(Block::Entry(EntryBlock {
            title: project.title.clone(),
            subtitle: String::new(),
            dates: String::new(),
            location: String::new(),
            link: Some(project.link.clone()).filter(|l| !l.trim().is_empty()),
        }));
        let technologies = project.technology_list();
        if !technologies.is_empty() {
            blocks.push(match tech {
                TechStyle::Plain | TechStyle::Italic => Block::Paragraph {
                    text: project.technologies.trim().to_string(),
                    emphasis: matches!(tech, TechStyle::Italic),
                },
                TechStyle::Tags => {
                    Block::Tags(technologies.into_iter().map(str::to_string).collect())
                }
            });
        }
        paragraph(blocks, &project.description);
    }
}

fn skill_names(doc: &ResumeDocument) -> Vec<String> {
    doc.skills.iter().map(|s| s.name.clone()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

pub fn modern(doc: &ResumeDocument) -> Vec<Block> {
    let info = &doc.personal_info;
    let mut blocks = Vec::new();
    header(&mut blocks, info);
    contact_block(&mut blocks, contact(info, LinkStyle::Handle, AddressStyle::Full));
    summary(&mut blocks, info, "Professional Summary");
    experience(&mut blocks, doc, "Work Experience");
    education(&mut blocks, doc, "Education");
    if !doc.skills.is_empty() {
        blocks.push(Block::Heading("Skills".to_string()));
        blocks.push(Block::Tags(skill_names(doc)));
    }
    projects(&mut blocks, doc, "Projects", TechStyle::Plain);
    blocks
}

pub fn professional(doc: &ResumeDocument) -> Vec<Block> {
    let info = &doc.personal_info;
    let mut blocks = Vec::new();
    header(&mut blocks, info);
    contact_block(&mut blocks, contact(info, LinkStyle::Label, AddressStyle::CityState));
    summary(&mut blocks, info, "PROFESSIONAL SUMMARY");
    experience(&mut blocks, doc, "WORK EXPERIENCE");
    education(&mut blocks, doc, "EDUCATION");
    if !doc.skills.is_empty() {
        blocks.push(Block::Heading("SKILLS".to_string()));
        blocks.push(Block::List(skill_names(doc)));
    }
    projects(&mut blocks, doc, "PROJECTS", TechStyle::Italic);
    blocks
}

pub fn minimal(doc: &ResumeDocument) -> Vec<Block> {
    let info = &doc.personal_info;
    let mut blocks = Vec::new();
    header(&mut blocks, info);
    contact_block(&mut blocks, contact(info, LinkStyle::Label, AddressStyle::CityState));
    summary(&mut blocks, info, "Summary");
    experience(&mut blocks, doc, "Experience");
    education(&mut blocks, doc, "Education");
    if !doc.skills.is_empty() {
        blocks.push(Block::Heading("Skills".to_string()));
        paragraph(&mut blocks, &skill_names(doc).join(", "));
    }
    projects(&mut blocks, doc, "Projects", TechStyle::Plain);
    blocks
}

pub fn creative(doc: &ResumeDocument) -> Vec<Block> {
    let info = &doc.personal_info;
    let mut blocks = Vec::new();

    // Sidebar
    header(&mut blocks, info);
    let items = contact(info, LinkStyle::Label, AddressStyle::CityState);
    if !items.is_empty() {
        blocks.push(Block::Heading("Contact".to_string()));
        blocks.push(Block::Contact(items));
    }
    if !doc.skills.is_empty() {
        blocks.push(Block::Heading("Skills".to_string()));
        for skill in &doc.skills {
            blocks.push(Block::Rating {
                label: skill.name.clone(),
                level: skill.level.get(),
            });
        }
    }
    education(&mut blocks, doc, "Education");
    blocks.push(Block::ColumnBreak);

    // Main column
    summary(&mut blocks, info, "About Me");
    experience(&mut blocks, doc, "Work Experience");
    projects(&mut blocks, doc, "Projects", TechStyle::Tags);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Education, Entity, Project, ProjectPatch, Skill, SkillLevel};

    fn doc() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip_code: "12345".to_string(),
                website: "https://www.jane.dev".to_string(),
                linkedin: "https://linkedin.com/in/janedoe".to_string(),
                github: "https://github.com/janedoe".to_string(),
                summary: "Hello".to_string(),
                ..PersonalInfo::default()
            },
            education: vec![Education {
                degree: "BSc".to_string(),
                field_of_study: "Physics".to_string(),
                school: "State U".to_string(),
                ..Education::blank("e1".to_string())
            }],
            skills: vec![
                Skill {
                    id: "s1".to_string(),
                    name: "Go".to_string(),
                    level: SkillLevel::new(4),
                },
                Skill {
                    id: "s2".to_string(),
                    name: "Rust".to_string(),
                    level: SkillLevel::new(5),
                },
            ],
            projects: vec![Project::create(
                "p1".to_string(),
                ProjectPatch {
                    title: Some("Atlas".to_string()),
                    technologies: Some("Rust, tokio".to_string()),
                    link: Some("https://github.com/janedoe/atlas".to_string()),
                    ..ProjectPatch::default()
                },
            )],
            ..ResumeDocument::default()
        }
    }

    fn headings(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_catalog_lists_all_four_templates() {
        let ids: Vec<_> = catalog().iter().map(|t| t.id).collect();
        assert_eq!(ids, TemplateChoice::ALL.to_vec());
    }

    #[test]
    fn test_modern_contact_uses_handles_and_full_address() {
        let blocks = modern(&doc());
        let Block::Contact(items) = &blocks[1] else {
            panic!("expected contact block, got {:?}", blocks[1]);
        };
        assert_eq!(
            items,
            &vec![
                "jane@example.com".to_string(),
                "1 Main St, Springfield, 12345".to_string(),
                "jane.dev".to_string(),
                "janedoe".to_string(),
                "janedoe".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let blocks = modern(&doc());
        assert_eq!(
            headings(&blocks),
            vec!["Professional Summary", "Education", "Skills", "Projects"]
        );
    }

    #[test]
    fn test_professional_headings_uppercase_and_skill_list() {
        let blocks = professional(&doc());
        assert!(headings(&blocks).iter().all(|h| *h == h.to_uppercase()));
        assert!(blocks.contains(&Block::List(vec!["Go".to_string(), "Rust".to_string()])));
        assert!(blocks.contains(&Block::Paragraph {
            text: "Rust, tokio".to_string(),
            emphasis: true
        }));
    }

    #[test]
    fn test_minimal_joins_skills() {
        let blocks = minimal(&doc());
        assert!(blocks.contains(&Block::Paragraph {
            text: "Go, Rust".to_string(),
            emphasis: false
        }));
    }

    #[test]
    fn test_creative_sidebar_then_main() {
        let blocks = creative(&doc());
        let split = blocks.iter().position(|b| *b == Block::ColumnBreak).unwrap();
        let (sidebar, main) = blocks.split_at(split);
        assert_eq!(headings(sidebar), vec!["Contact", "Skills", "Education"]);
        assert_eq!(headings(main), vec!["About Me", "Projects"]);
        assert!(sidebar.contains(&Block::Rating {
            label: "Rust".to_string(),
            level: 5
        }));
        assert!(main.contains(&Block::Tags(vec!["Rust".to_string(), "tokio".to_string()])));
    }

    #[test]
    fn test_education_subtitle_combines_degree_and_field() {
        let blocks = modern(&doc());
        assert!(blocks.iter().any(|b| matches!(
            b,
            Block::Entry(e) if e.title == "State U" && e.subtitle == "BSc in Physics"
        )));
    }
}
