use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LEADS_PER_WEEK: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Landing,
    Business,
    Shop,
    #[default]
    Other,
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "landing" => Ok(ProjectType::Landing),
            "business" => Ok(ProjectType::Business),
            "shop" => Ok(ProjectType::Shop),
            "other" => Ok(ProjectType::Other),
            other => Err(format!("unknown project type: {other}")),
        }
    }
}

/// A past client willing to talk to prospects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceClient {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub business_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub niche: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReferenceClient {
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub niche: String,
    pub note: String,
    pub project_type: ProjectType,
    pub is_active: bool,
    pub max_leads_per_week: u32,
}

impl Default for NewReferenceClient {
    fn default() -> Self {
        NewReferenceClient {
            name: String::new(),
            business_name: String::new(),
            email: String::new(),
            phone: String::new(),
            niche: String::new(),
            note: String::new(),
            project_type: ProjectType::Other,
            is_active: true,
            max_leads_per_week: DEFAULT_MAX_LEADS_PER_WEEK,
        }
    }
}

impl NewReferenceClient {
    /// Trims every text field; a zero lead cap becomes the default.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.business_name,
            &mut self.email,
            &mut self.phone,
            &mut self.niche,
            &mut self.note,
        ] {
            *field = field.trim().to_string();
        }
        if self.max_leads_per_week == 0 {
            self.max_leads_per_week = DEFAULT_MAX_LEADS_PER_WEEK;
        }
        self
    }
}

/// Lead cap typed into a form field. Blank, zero or non-numeric input
/// falls back to the default.
pub fn parse_max_leads(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => DEFAULT_MAX_LEADS_PER_WEEK,
        Ok(n) => n,
    }
}

/// A portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_name: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub description: String,
    pub long_description: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub client_name: String,
    pub project_type: String,
    pub description: String,
    pub long_description: String,
    pub url: String,
    pub images: Vec<String>,
    pub order: i64,
    pub is_active: bool,
}

impl Default for NewProject {
    fn default() -> Self {
        NewProject {
            client_name: String::new(),
            project_type: String::new(),
            description: String::new(),
            long_description: String::new(),
            url: String::new(),
            images: Vec::new(),
            order: 0,
            is_active: true,
        }
    }
}

impl NewProject {
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.client_name,
            &mut self.project_type,
            &mut self.description,
            &mut self.long_description,
            &mut self.url,
        ] {
            *field = field.trim().to_string();
        }
        self.images = self
            .images
            .into_iter()
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty())
            .collect();
        self
    }
}
