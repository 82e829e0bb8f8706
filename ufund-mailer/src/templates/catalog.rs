//! Built-in template catalog for the UFUND platform.
//!
//! Bodies are inner content only; the master layout supplies the chrome.
//! Each definition names the seed file its body originated from.

use super::{TemplateDefinition, TemplateVariable};

/// The full static catalog, loaded once at process start.
pub fn builtin_templates() -> Vec<TemplateDefinition> {
    vec![
        TemplateDefinition {
            template_id: "WELCOME".to_string(),
            name: "Welcome".to_string(),
            description: "Sent after account registration".to_string(),
            subject: "Welcome to {{appName}}, {{firstName}}!".to_string(),
            source_file: "welcome.html".to_string(),
            variables: vec![TemplateVariable::required("firstName", "Recipient first name")],
            html: r#"<h2>Welcome aboard, {{firstName}}!</h2>
<p>Your {{appName}} account is ready. You can now browse live campaigns, follow founders, and build your investment portfolio.</p>
<div style="text-align: center;">
    <a href="{{dashboardUrl}}" class="button">Go to your dashboard</a>
</div>
<p>If you did not create this account, please contact {{supportEmail}} right away.</p>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "EMAIL_VERIFICATION".to_string(),
            name: "Email verification".to_string(),
            description: "Address confirmation link sent at signup".to_string(),
            subject: "Verify your {{appName}} email address".to_string(),
            source_file: "email_verification.html".to_string(),
            variables: vec![
                TemplateVariable::required("firstName", "Recipient first name"),
                TemplateVariable::required("verificationUrl", "One-time verification link"),
            ],
            html: r#"<h2>Confirm your email</h2>
<p>Hello {{firstName}},</p>
<p>Click the button below to verify this address and activate your account.</p>
<div style="text-align: center;">
    <a href="{{verificationUrl}}" class="button">Verify email</a>
</div>
<p>Or copy and paste this URL into your browser:</p>
<p style="word-break: break-all; background: #f8f9fa; padding: 10px; border-radius: 4px; font-family: monospace;">{{verificationUrl}}</p>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "PASSWORD_RESET".to_string(),
            name: "Password reset".to_string(),
            description: "Reset link for a forgotten password".to_string(),
            subject: "Reset your {{appName}} password".to_string(),
            source_file: "password_reset.html".to_string(),
            variables: vec![
                TemplateVariable::required("firstName", "Recipient first name"),
                TemplateVariable::required("resetUrl", "One-time reset link"),
                TemplateVariable::optional("expiresInMinutes", "Link lifetime in minutes"),
            ],
            html: r#"<h2>Password reset requested</h2>
<p>Hello {{firstName}},</p>
<p>We received a request to reset your password. This link expires in {{expiresInMinutes}} minutes.</p>
<div style="text-align: center;">
    <a href="{{resetUrl}}" class="button">Choose a new password</a>
</div>
<p>If you did not request this, you can safely ignore this email.</p>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "KYC_APPROVED".to_string(),
            name: "KYC approved".to_string(),
            description: "Identity verification passed".to_string(),
            subject: "Your {{appName}} identity verification is approved".to_string(),
            source_file: "kyc_approved.html".to_string(),
            variables: vec![TemplateVariable::required("firstName", "Recipient first name")],
            html: r#"<h2>You're verified, {{firstName}}</h2>
<p>Your identity verification has been approved. You can now invest in any live campaign on {{appName}}.</p>
<div style="text-align: center;">
    <a href="{{dashboardUrl}}" class="button">Start investing</a>
</div>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "KYC_REJECTED".to_string(),
            name: "KYC rejected".to_string(),
            description: "Identity verification failed".to_string(),
            subject: "Action needed on your {{appName}} identity verification".to_string(),
            source_file: "kyc_rejected.html".to_string(),
            variables: vec![
                TemplateVariable::required("firstName", "Recipient first name"),
                TemplateVariable::optional("reason", "Reviewer-provided rejection reason"),
            ],
            html: r#"<h2>We couldn't verify your identity</h2>
<p>Hello {{firstName}},</p>
<p>Your identity verification was not approved. {{reason}}</p>
<p>You can resubmit your documents from your account settings. Contact {{supportEmail}} if you need assistance.</p>
<div style="text-align: center;">
    <a href="{{dashboardUrl}}" class="button">Resubmit documents</a>
</div>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "CAMPAIGN_APPROVED".to_string(),
            name: "Campaign approved".to_string(),
            description: "Campaigner's project cleared review and is live".to_string(),
            subject: "{{campaignTitle}} is live on {{appName}}".to_string(),
            source_file: "campaign_approved.html".to_string(),
            variables: vec![
                TemplateVariable::required("firstName", "Campaigner first name"),
                TemplateVariable::required("campaignTitle", "Campaign title"),
                TemplateVariable::required("campaignUrl", "Public campaign page"),
            ],
            html: r#"<h2>Congratulations, {{firstName}}!</h2>
<p><strong>{{campaignTitle}}</strong> passed review and is now live. Share your campaign page to start collecting investments.</p>
<div style="text-align: center;">
    <a href="{{campaignUrl}}" class="button">View your campaign</a>
</div>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "INVESTMENT_CONFIRMED".to_string(),
            name: "Investment confirmed".to_string(),
            description: "Receipt for a completed investment".to_string(),
            subject: "Your investment in {{campaignTitle}} is confirmed".to_string(),
            source_file: "investment_confirmed.html".to_string(),
            variables: vec![
                TemplateVariable::required("firstName", "Investor first name"),
                TemplateVariable::required("campaignTitle", "Campaign title"),
                TemplateVariable::required("amount", "Invested amount, formatted"),
                TemplateVariable::optional("currency", "Currency code"),
            ],
            html: r#"<h2>Investment confirmed</h2>
<p>Hello {{firstName}},</p>
<p>Your investment of <strong>{{amount}} {{currency}}</strong> in <strong>{{campaignTitle}}</strong> has been confirmed. You can track the campaign's progress from your portfolio.</p>
<div style="text-align: center;">
    <a href="{{dashboardUrl}}" class="button">View portfolio</a>
</div>"#
                .to_string(),
        },
        TemplateDefinition {
            template_id: "CAMPAIGN_FUNDED".to_string(),
            name: "Campaign funded".to_string(),
            description: "Campaign reached its funding goal".to_string(),
            subject: "{{campaignTitle}} reached its goal!".to_string(),
            source_file: "campaign_funded.html".to_string(),
            variables: vec![
                TemplateVariable::required("firstName", "Recipient first name"),
                TemplateVariable::required("campaignTitle", "Campaign title"),
                TemplateVariable::required("totalRaised", "Total raised, formatted"),
                TemplateVariable::optional("percentageFunded", "Funding percentage reached"),
            ],
            html: r#"<h2>Goal reached!</h2>
<p>Hello {{firstName}},</p>
<p><strong>{{campaignTitle}}</strong> has reached its funding goal with <strong>{{totalRaised}}</strong> raised ({{percentageFunded}}% funded).</p>
<div style="text-align: center;">
    <a href="{{dashboardUrl}}" class="button">See the details</a>
</div>"#
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{TemplateRenderer, TemplateVars};
    use std::collections::HashSet;

    #[test]
    fn test_template_ids_unique() {
        let templates = builtin_templates();
        let ids: HashSet<_> = templates.iter().map(|t| t.template_id.clone()).collect();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_every_template_declares_variables() {
        for template in builtin_templates() {
            assert!(
                !template.variables.is_empty(),
                "{} declares no variables",
                template.template_id
            );
            assert!(!template.subject.is_empty());
            assert!(!template.html.is_empty());
            assert!(!template.source_file.is_empty());
        }
    }

    #[test]
    fn test_every_template_renders() {
        let renderer = TemplateRenderer::new();

        for template in builtin_templates() {
            let vars: TemplateVars = template
                .variables
                .iter()
                .map(|v| {
                    (
                        v.name.clone(),
                        serde_json::Value::String(format!("test-{}", v.name)),
                    )
                })
                .collect();

            let rendered = renderer
                .render(&template.subject, &template.html, &vars)
                .unwrap();
            assert!(!rendered.subject.is_empty());
            assert!(rendered.html.contains("test-firstName"));
        }
    }
}
