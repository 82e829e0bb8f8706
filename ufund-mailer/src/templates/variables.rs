use crate::{config::BrandConfig, templates::TemplateVars};
use chrono::{Datelike, Utc};
use serde_json::Value;

/// Merges the fixed brand variables with per-call variables.
///
/// Caller-supplied values win on key collision. The merge is shallow; values
/// pass through untouched.
pub struct VariableResolver {
    brand: BrandConfig,
}

impl VariableResolver {
    pub fn new(brand: BrandConfig) -> Self {
        Self { brand }
    }

    /// The fixed global set every template can rely on.
    pub fn global_variables(&self) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.insert(
            "appName".to_string(),
            Value::String(self.brand.app_name.clone()),
        );
        vars.insert(
            "logoUrl".to_string(),
            Value::String(self.brand.logo_url.clone()),
        );
        vars.insert(
            "dashboardUrl".to_string(),
            Value::String(self.brand.dashboard_url.clone()),
        );
        vars.insert(
            "supportEmail".to_string(),
            Value::String(self.brand.support_email.clone()),
        );
        vars.insert(
            "legalName".to_string(),
            Value::String(self.brand.legal_name.clone()),
        );
        vars.insert(
            "legalAddress".to_string(),
            Value::String(self.brand.legal_address.clone()),
        );
        vars.insert("currentYear".to_string(), Value::from(Utc::now().year()));
        vars.insert(
            "webUrl".to_string(),
            Value::String(self.brand.web_url.clone()),
        );
        vars
    }

    pub fn resolve(&self, caller_variables: &TemplateVars) -> TemplateVars {
        let mut merged = self.global_variables();

        for (key, value) in caller_variables {
            merged.insert(key.clone(), value.clone());
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globals_present() {
        let resolver = VariableResolver::new(BrandConfig::default());
        let vars = resolver.global_variables();

        assert_eq!(vars["appName"], Value::String("UFUND".to_string()));
        assert!(vars.contains_key("logoUrl"));
        assert!(vars.contains_key("dashboardUrl"));
        assert!(vars.contains_key("supportEmail"));
        assert!(vars.contains_key("legalName"));
        assert!(vars.contains_key("legalAddress"));
        assert!(vars.contains_key("webUrl"));
        assert_eq!(vars["currentYear"], Value::from(Utc::now().year()));
    }

    #[test]
    fn test_caller_wins_on_collision() {
        let resolver = VariableResolver::new(BrandConfig::default());

        let mut caller = TemplateVars::new();
        caller.insert(
            "appName".to_string(),
            Value::String("Other".to_string()),
        );
        caller.insert(
            "firstName".to_string(),
            Value::String("Ann".to_string()),
        );

        let merged = resolver.resolve(&caller);
        assert_eq!(merged["appName"], Value::String("Other".to_string()));
        assert_eq!(merged["firstName"], Value::String("Ann".to_string()));
        // Globals not overridden survive the merge.
        assert!(merged.contains_key("supportEmail"));
    }

    #[test]
    fn test_merge_is_shallow() {
        let resolver = VariableResolver::new(BrandConfig::default());

        let mut caller = TemplateVars::new();
        caller.insert(
            "campaign".to_string(),
            serde_json::json!({"title": "Solar Farm"}),
        );

        let merged = resolver.resolve(&caller);
        assert_eq!(merged["campaign"]["title"], "Solar Farm");
    }
}
