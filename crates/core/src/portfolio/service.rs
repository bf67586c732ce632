//! Service offerings and the "latest works per service" grouping.

use serde::{Deserialize, Serialize};

use super::work::Work;
use crate::types::ServiceId;

/// Works shown per service on the home page.
pub const LATEST_PER_SERVICE: usize = 3;

/// Name fragments used to infer a tag when a service has no category.
const TAG_HINTS: &[(&str, &str)] = &[
    ("Acoustic", "Acoustic"),
    ("Music", "Music"),
    ("Film", "Films"),
    ("Entertainment", "Entertainment"),
];

/// A named offering used to group works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Explicit tag (`Acoustic`, `Music`, `Films`, `Entertainment`).
    #[serde(default)]
    pub category: Option<String>,
    /// Admin-defined display position.
    #[serde(default)]
    pub order: Option<i64>,
}

impl Service {
    /// The tag works are matched against.
    ///
    /// Uses the explicit category when set; otherwise infers one from the
    /// service name, falling back to the name itself.
    #[must_use]
    pub fn tag(&self) -> &str {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            return category;
        }
        TAG_HINTS
            .iter()
            .find(|(hint, _)| self.name.contains(*hint))
            .map_or(self.name.as_str(), |&(_, tag)| tag)
    }
}

/// Sort services by their admin-defined order; services without one go
/// last. Ties keep their input order.
pub fn order_services(services: &mut [Service]) {
    services.sort_by_key(|s| s.order.unwrap_or(i64::MAX));
}

/// Built-in offerings shown when the API has no services configured, in
/// display order.
#[must_use]
pub fn default_services() -> Vec<Service> {
    const DEFAULTS: &[(&str, &str, &str, &str, i64)] = &[
        (
            "acoustic",
            "Fire Acoustic",
            "Acoustic",
            "Premium acoustic sound, live audio capture, and room-tuned mixes that feel real.",
            2,
        ),
        (
            "music",
            "Fire Music",
            "Music",
            "Original music, mixing, and mastering engineered for streaming and brand identity.",
            1,
        ),
        (
            "films",
            "Fire Films",
            "Films",
            "Cinematic filming, color grading, and edits designed to hold attention.",
            4,
        ),
        (
            "entertainment",
            "Fire Entertainment",
            "Entertainment",
            "Creative show concepts and immersive experiences built for maximum impact.",
            3,
        ),
    ];

    let mut services: Vec<Service> = DEFAULTS
        .iter()
        .map(|&(key, name, tag, description, order)| Service {
            id: ServiceId::new(key),
            name: name.to_string(),
            description: description.to_string(),
            image_url: None,
            category: Some(tag.to_string()),
            order: Some(order),
        })
        .collect();
    order_services(&mut services);
    services
}

/// `services` in display order, or [`default_services`] when there are none.
#[must_use]
pub fn services_or_default(mut services: Vec<Service>) -> Vec<Service> {
    if services.is_empty() {
        return default_services();
    }
    order_services(&mut services);
    services
}

/// A service together with its most recent works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceGroup<'a> {
    pub service: &'a Service,
    pub works: Vec<&'a Work>,
}

/// For each service, in the order given, the first `per_service` works
/// tagged with it.
#[must_use]
pub fn latest_per_service<'a>(
    works: &'a [Work],
    services: &'a [Service],
    per_service: usize,
) -> Vec<ServiceGroup<'a>> {
    services
        .iter()
        .map(|service| {
            let tag = service.tag();
            ServiceGroup {
                service,
                works: works
                    .iter()
                    .filter(|w| w.is_tagged(tag))
                    .take(per_service)
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::WorkId;

    fn service(name: &str, category: Option<&str>, order: Option<i64>) -> Service {
        Service {
            id: ServiceId::new(name),
            name: name.to_string(),
            description: String::new(),
            image_url: None,
            category: category.map(ToString::to_string),
            order,
        }
    }

    fn work(id: &str, category: &str) -> Work {
        Work {
            id: WorkId::new(id),
            title: id.to_string(),
            description: String::new(),
            image_urls: Vec::new(),
            link: None,
            category: category.to_string(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_tag_prefers_category_then_name_hints() {
        assert_eq!(service("Live Sound", Some("Acoustic"), None).tag(), "Acoustic");
        assert_eq!(service("Film Production", None, None).tag(), "Films");
        assert_eq!(service("Music Production", Some(""), None).tag(), "Music");
        assert_eq!(service("Weddings", None, None).tag(), "Weddings");
    }

    #[test]
    fn test_order_services_puts_unordered_last() {
        let mut services = vec![
            service("c", None, None),
            service("b", None, Some(2)),
            service("a", None, Some(1)),
            service("d", None, None),
        ];
        order_services(&mut services);
        let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_latest_per_service_takes_first_matches() {
        let services = vec![
            service("Acoustic", None, None),
            service("Entertainment", None, None),
        ];
        let works: Vec<Work> = (0..5).map(|i| work(&i.to_string(), "Acoustic")).collect();

        let groups = latest_per_service(&works, &services, LATEST_PER_SERVICE);
        assert_eq!(groups.len(), 2);
        let ids: Vec<&str> = groups[0].works.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
        assert!(groups[1].works.is_empty());
    }

    #[test]
    fn test_default_services_in_display_order() {
        let defaults = default_services();
        let tags: Vec<&str> = defaults.iter().map(Service::tag).collect();
        assert_eq!(tags, vec!["Music", "Acoustic", "Entertainment", "Films"]);
        assert_eq!(defaults[0].name, "Fire Music");
    }

    #[test]
    fn test_services_or_default() {
        assert_eq!(services_or_default(Vec::new()), default_services());

        let configured = services_or_default(vec![
            service("b", None, Some(2)),
            service("a", None, Some(1)),
        ]);
        let names: Vec<&str> = configured.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_service_deserializes_from_api_shape() {
        let svc: Service = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "name": "Acoustic Treatment",
            "description": "Rooms that sound right",
            "imageUrl": "/uploads/a.png",
            "order": 3
        }))
        .unwrap();
        assert_eq!(svc.id.as_str(), "s1");
        assert_eq!(svc.order, Some(3));
        assert_eq!(svc.tag(), "Acoustic");
    }
}
