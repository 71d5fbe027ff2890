//! Supported cloud service catalog
//!
//! The catalog is fixed configuration: loaded once at startup and handed to
//! the orchestrators by reference.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A cloud service the analysis understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudService {
    /// Identifier used as the service type in diagrams (e.g. `aws-ec2`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Category, e.g. "Compute"
    pub category: String,
    /// Provider, e.g. "AWS"
    pub provider: String,
}

impl CloudService {
    fn new(id: &str, name: &str, category: &str, provider: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            provider: provider.to_string(),
        }
    }
}

/// Read-only set of supported services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    services: Vec<CloudService>,
}

impl ServiceCatalog {
    /// Build a catalog from an explicit service list
    #[must_use]
    pub const fn new(services: Vec<CloudService>) -> Self {
        Self { services }
    }

    /// The 18 built-in services (six per provider)
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            CloudService::new("aws-ec2", "EC2", "Compute", "AWS"),
            CloudService::new("aws-lambda", "Lambda", "Compute", "AWS"),
            CloudService::new("aws-s3", "S3", "Storage", "AWS"),
            CloudService::new("aws-rds", "RDS", "Database", "AWS"),
            CloudService::new("aws-cloudfront", "CloudFront", "CDN", "AWS"),
            CloudService::new("aws-sqs", "SQS", "Messaging", "AWS"),
            CloudService::new("azure-vm", "Virtual Machine", "Compute", "Azure"),
            CloudService::new("azure-functions", "Functions", "Compute", "Azure"),
            CloudService::new("azure-storage", "Storage", "Storage", "Azure"),
            CloudService::new("azure-sql", "SQL Database", "Database", "Azure"),
            CloudService::new("azure-cdn", "CDN", "CDN", "Azure"),
            CloudService::new("azure-service-bus", "Service Bus", "Messaging", "Azure"),
            CloudService::new("gcp-compute", "Compute Engine", "Compute", "GCP"),
            CloudService::new("gcp-cloud-functions", "Cloud Functions", "Compute", "GCP"),
            CloudService::new("gcp-storage", "Cloud Storage", "Storage", "GCP"),
            CloudService::new("gcp-sql", "Cloud SQL", "Database", "GCP"),
            CloudService::new("gcp-cdn", "Cloud CDN", "CDN", "GCP"),
            CloudService::new("gcp-pubsub", "Pub/Sub", "Messaging", "GCP"),
        ])
    }

    /// All services in catalog order
    #[must_use]
    pub fn services(&self) -> &[CloudService] {
        &self.services
    }

    /// Number of services
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Look up a service by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CloudService> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Whether `id` names a supported service
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Services grouped by provider, providers in first-seen order
    #[must_use]
    pub fn by_provider(&self) -> Vec<(&str, Vec<&CloudService>)> {
        let mut groups: Vec<(&str, Vec<&CloudService>)> = Vec::new();
        for service in &self.services {
            match groups.iter_mut().find(|(p, _)| *p == service.provider) {
                Some((_, members)) => members.push(service),
                None => groups.push((service.provider.as_str(), vec![service])),
            }
        }
        groups
    }

    /// Diagram services that the catalog does not know
    #[must_use]
    pub fn unsupported<'a, I>(&self, services: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        services.into_iter().filter(|s| !self.contains(s)).cloned().collect()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
