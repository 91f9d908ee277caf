/// A browsable prompt category
///
/// The six entries below are the built-in catalog shown on the landing page.
/// Prompt rows store the category as free text, so authors can also file a
/// prompt under a custom name; custom categories simply don't appear in the
/// built-in listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const BUILT_IN_CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        name: "Creative Writing",
        icon: "pencil",
        description: "Prompts for storytelling, poetry, and creative content generation",
    },
    CategoryInfo {
        name: "Programming",
        icon: "code",
        description: "Prompts for code generation, debugging, and software development",
    },
    CategoryInfo {
        name: "Business",
        icon: "briefcase",
        description: "Prompts for marketing, sales, business strategies, and more",
    },
    CategoryInfo {
        name: "Education",
        icon: "graduation-cap",
        description: "Prompts for learning, teaching, and educational content",
    },
    CategoryInfo {
        name: "Personal Productivity",
        icon: "calendar",
        description: "Prompts for organization, planning, and personal development",
    },
    CategoryInfo {
        name: "Data Analysis",
        icon: "bar-chart",
        description: "Prompts for data interpretation, visualization, and insights",
    },
];
