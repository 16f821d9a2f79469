use super::{MemoryPage, NodeId};

const SKILLS: [(&str, &str); 4] = [
    ("Manual & Automated Testing", "90%"),
    ("Java", "85%"),
    ("HTML & CSS", "80%"),
    ("JavaScript", "75%"),
];

const PROJECTS: [&str; 2] = ["Inventory Manager", "Test Automation Suite"];

const SECTIONS: [(&str, f64); 6] = [
    ("home", 900.0),
    ("about", 800.0),
    ("skills", 800.0),
    ("projects", 1000.0),
    ("experience", 800.0),
    ("contact", 800.0),
];

impl MemoryPage {
    /// The portfolio page markup the controller is written against: fixed
    /// navigation with a mobile overlay, six stacked sections, skill bars,
    /// project cards, the contact form and a footer year.
    pub fn portfolio() -> Self {
        let mut page = MemoryPage::new();
        let body = page.body();

        let nav = page
            .element(body, "nav")
            .id("navigation")
            .class("navigation")
            .layout(0.0, 80.0)
            .build();
        for (section, _) in SECTIONS {
            page.element(nav, "a")
                .class("nav-link")
                .attr("href", &format!("#{section}"))
                .text(&capitalize(section))
                .build();
        }
        page.element(nav, "button")
            .class("mobile-menu-btn")
            .attr("aria-label", "Toggle menu")
            .build();
        let overlay = page.element(body, "div").id("mobile-menu").class("mobile-menu").build();
        for (section, _) in SECTIONS {
            page.element(overlay, "a")
                .class("mobile-nav-link")
                .attr("href", &format!("#{section}"))
                .text(&capitalize(section))
                .build();
        }

        let mut top = 0.0;
        let mut sections = Vec::new();
        for (section, height) in SECTIONS {
            let node = page
                .element(body, "section")
                .id(section)
                .layout(top, height)
                .build();
            sections.push((node, top));
            top += height;
        }

        let (home, _) = sections[0];
        page.element(home, "h1").class("work-text").text("Software Tester").build();
        page.element(home, "a")
            .class("hero-btn")
            .attr("href", "#contact")
            .text(" Get In Touch ")
            .build();

        let (about, about_top) = sections[1];
        page.element(about, "img")
            .class("lazy")
            .attr("data-src", "assets/profile.jpg")
            .attr("alt", "Portrait")
            .layout(about_top + 100.0, 300.0)
            .build();

        let (skills, skills_top) = sections[2];
        let category = page
            .element(skills, "div")
            .class("skill-category")
            .layout(skills_top + 80.0, 600.0)
            .build();
        for (name, level) in SKILLS {
            add_skill(&mut page, category, name, level);
        }

        let (projects, projects_top) = sections[3];
        for (idx, title) in PROJECTS.iter().enumerate() {
            let card = page
                .element(projects, "div")
                .class("project-card")
                .layout(projects_top + 80.0 + idx as f64 * 420.0, 400.0)
                .build();
            page.element(card, "h3").text(title).build();
            let actions = page.element(card, "div").class("project-actions").build();
            page.element(actions, "a").class("project-btn").text("View Code").build();
            page.element(actions, "a").class("project-btn").text("Live Demo").build();
        }

        let (experience, experience_top) = sections[4];
        page.element(experience, "div")
            .class("experience-card")
            .layout(experience_top + 80.0, 300.0)
            .build();

        let (contact, _) = sections[5];
        let form = page.element(contact, "form").id("contact-form").build();
        page.element(form, "input")
            .id("name")
            .attr("name", "name")
            .attr("type", "text")
            .build();
        page.element(form, "input")
            .id("email")
            .attr("name", "email")
            .attr("type", "email")
            .build();
        page.element(form, "textarea")
            .id("message")
            .attr("name", "message")
            .build();
        page.element(form, "button")
            .attr("type", "submit")
            .class("contact-btn")
            .text("Send Message")
            .build();
        let socials = page.element(contact, "div").class("social-links").build();
        for platform in ["GitHub", "LinkedIn"] {
            let link = page
                .element(socials, "a")
                .class("social-btn")
                .attr("aria-label", platform)
                .build();
            page.element(link, "i").attr("data-lucide", &platform.to_ascii_lowercase()).build();
        }

        let footer = page.element(body, "footer").layout(top, 120.0).build();
        page.element(footer, "span").id("current-year").text("2024").build();

        page
    }
}

fn add_skill(page: &mut MemoryPage, category: NodeId, name: &str, level: &str) {
    let item = page.element(category, "div").class("skill-item").build();
    let header = page.element(item, "div").class("skill-header").build();
    page.element(header, "span").class("skill-name").text(name).build();
    page.element(header, "span").class("skill-level").text(level).build();
    let track = page.element(item, "div").class("progress-bar").build();
    page.element(track, "div").class("progress").build();
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
