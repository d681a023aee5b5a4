//! Catalog: the static input of a planning run.
//!
//! A catalog bundles projects (with their phases and task copies) and the
//! resource pool. It can be built in code, loaded from JSON, or taken
//! from the bundled web-agency sample.
//!
//! # JSON Layout
//!
//! ```json
//! {
//!   "resources": [{ "id": "TDS", "cost_per_hour": 15.0, "tags": ["WebDeveloper"] }],
//!   "projects": [{
//!     "id": 1,
//!     "phases": [{ "id": 1, "tasks": [
//!       { "id": "DEV1", "tag": "WebDeveloper", "estimated_ms": { "TDS": 2760000 } }
//!     ]}]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::error::Result;
use crate::models::{hours, minutes, Phase, Project, Resource, Tag, Task};

/// Projects and resources for one planning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Resource pool in priority order (earlier resources win ties).
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Projects in scheduling order.
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Adds a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a catalog from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serializes the catalog to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of task instances across all projects.
    pub fn task_count(&self) -> usize {
        self.projects.iter().map(Project::task_count).sum()
    }

    /// Finds a resource by id.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Sample catalog of a small web agency.
    ///
    /// Eight people across four roles, seven phase templates
    /// (requirements, design, two development variants, two testing
    /// variants, release) and six projects built from them.
    pub fn web_agency() -> Self {
        let t = web_agency_tasks();
        let pick = |idx: &[usize]| idx.iter().map(|&i| t[i].clone()).collect::<Vec<_>>();

        let phases = [
            Phase::new(1).with_tasks(pick(&[0, 1, 2, 3])),
            Phase::new(2).with_tasks(pick(&[4, 5, 6, 7, 8, 9])),
            Phase::new(3).with_tasks(pick(&[10, 11, 12, 13, 15, 19, 20, 27, 28, 29])),
            Phase::new(4).with_tasks(pick(&[
                10, 11, 12, 13, 15, 16, 17, 18, 19, 20, 27, 28, 29,
            ])),
            Phase::new(5).with_tasks(pick(&[30, 32, 35, 36])),
            Phase::new(6).with_tasks(pick(&[30, 31, 32, 35, 36])),
            Phase::new(7).with_tasks(pick(&[37, 41])),
        ];

        // Short projects use the lighter development and testing phases.
        let short = [0, 1, 2, 4, 6];
        let long = [0, 1, 3, 5, 6];
        let layouts = [short, long, long, short, long, short];

        let projects = layouts
            .iter()
            .zip(1u32..)
            .map(|(layout, id)| {
                layout
                    .iter()
                    .fold(Project::new(id), |p, &i| p.with_phase(phases[i].clone()))
            })
            .collect();

        let person = |id: &str, cost: f64, tag: Tag| {
            Resource::new(id)
                .with_available(hours(8 * 5 * 4))
                .with_cost(cost)
                .with_tag(tag)
        };

        Self {
            resources: vec![
                person("TDS", 15.0, Tag::WebDeveloper),
                person("FLD", 13.0, Tag::WebDeveloper),
                person("XDI", 10.0, Tag::WebDeveloper),
                person("GEO", 10.0, Tag::WebDesigner),
                person("SGI", 10.0, Tag::WebConsultant),
                person("JMK", 9.0, Tag::WebConsultant),
                person("JIG", 7.0, Tag::WebConsultant),
                person("SGK", 13.0, Tag::ProjectManager),
            ],
            projects,
        }
    }
}

fn web_agency_tasks() -> Vec<Task> {
    const DEV: [&str; 3] = ["TDS", "FLD", "XDI"];
    const CONS: [&str; 3] = ["SGI", "JMK", "JIG"];

    let pm = |id: &str, m: i64| {
        Task::new(id, Tag::ProjectManager)
            .with_estimate("SGK", minutes(m))
            .with_price(30.0)
    };
    let designer = |id: &str, m: i64| {
        Task::new(id, Tag::WebDesigner)
            .with_estimate("GEO", minutes(m))
            .with_price(30.0)
    };
    let team = |id: &str, tag: Tag, who: [&str; 3], m: [i64; 3]| {
        who.iter()
            .zip(m)
            .fold(Task::new(id, tag), |t, (r, m)| t.with_estimate(*r, minutes(m)))
            .with_price(30.0)
    };
    let dev = |id: &str, m: [i64; 3]| team(id, Tag::WebDeveloper, DEV, m);
    let cons = |id: &str, m: [i64; 3]| team(id, Tag::WebConsultant, CONS, m);

    vec![
        pm("REQ1", 43),
        pm("REQ2", 47),
        pm("REQ3", 27),
        pm("REQ4", 56),
        pm("DES1", 43),
        pm("DES2", 26),
        designer("DES3", 421),
        pm("DES4", 47),
        designer("DES5", 155),
        pm("DES6", 28),
        dev("DEV1", [46, 58, 92]),
        dev("DEV2", [23, 33, 56]),
        dev("DEV3", [72, 86, 122]),
        dev("DEV4", [162, 193, 258]),
        dev("DEV5", [77, 99, 133]),
        dev("DEV6", [53, 61, 99]),
        dev("DEV7", [61, 80, 97]),
        dev("DEV8", [48, 59, 93]),
        dev("DEV9", [51, 60, 84]),
        cons("DEV10", [310, 366, 450]),
        dev("DEV11", [108, 122, 165]),
        dev("DEV12", [108, 126, 153]),
        dev("DEV13", [412, 471, 480]),
        cons("DEV14", [351, 379, 441]),
        cons("DEV15", [259, 282, 321]),
        dev("DEV16", [119, 134, 198]),
        dev("DEV17", [120, 130, 164]),
        pm("DEV18", 112),
        dev("DEV19", [102, 124, 139]),
        pm("DEV20", 32),
        cons("TES1", [173, 186, 268]),
        cons("TES2", [178, 179, 263]),
        cons("TES3", [175, 184, 229]),
        dev("TES4", [105, 159, 180]),
        cons("TES5", [112, 187, 231]),
        dev("TES6", [85, 112, 167]),
        pm("TES7", 87),
        dev("REL1", [47, 63, 107]),
        pm("REL2", 77),
        pm("REL3", 88),
        dev("REL4", [143, 198, 260]),
        pm("REL5", 54),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_agency_shape() {
        let c = Catalog::web_agency();
        assert_eq!(c.resources.len(), 8);
        assert_eq!(c.projects.len(), 6);
        assert!(c.projects.iter().all(|p| p.phases.len() == 5));

        // short: 4 + 6 + 10 + 4 + 2, long: 4 + 6 + 13 + 5 + 2
        assert_eq!(c.projects[0].task_count(), 26);
        assert_eq!(c.projects[1].task_count(), 30);
        assert_eq!(c.task_count(), 3 * 26 + 3 * 30);
    }

    #[test]
    fn test_web_agency_resources() {
        let c = Catalog::web_agency();
        let sgk = c.resource("SGK").unwrap();
        assert!(sgk.has_tag(&Tag::ProjectManager));
        assert!((sgk.cost_per_hour - 13.0).abs() < 1e-10);
        assert_eq!(sgk.available_ms, hours(160));
        assert!(c.resource("NOBODY").is_none());
    }

    #[test]
    fn test_web_agency_estimates() {
        let c = Catalog::web_agency();
        let dev1 = c.projects[0]
            .tasks()
            .find(|t| t.id == "DEV1")
            .unwrap();
        assert_eq!(dev1.estimate_for("TDS"), Some(minutes(46)));
        assert_eq!(dev1.estimate_for("XDI"), Some(minutes(92)));
        assert_eq!(dev1.estimate_for("SGK"), None);
    }

    #[test]
    fn test_json_round_trip() {
        let c = Catalog::web_agency();
        let json = c.to_json().unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_from_json_minimal() {
        let json = r#"{
            "resources": [{ "id": "R1", "tags": ["WebDeveloper"] }],
            "projects": [{ "id": 1, "phases": [{ "id": 1, "tasks": [
                { "id": "A", "tag": "WebDeveloper", "estimated_ms": { "R1": 60000 } }
            ]}]}]
        }"#;
        let c = Catalog::from_reader(json.as_bytes()).unwrap();
        assert_eq!(c.task_count(), 1);
        assert_eq!(c.resources[0].cost_per_hour, 0.0);
        assert!(c.projects[0].tags.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Catalog::from_json(r#"{"resources": 5}"#).is_err());
    }
}
