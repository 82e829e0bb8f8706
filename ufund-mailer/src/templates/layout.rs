/// Shared HTML shell wrapping every rendered email body.
///
/// Template bodies are injected at `{{{content}}}`; the surrounding chrome
/// (header, footer, legal block) resolves against the same merged variables
/// as the body itself.
pub const MASTER_LAYOUT: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{appName}}</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 20px; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; }
        .header img { max-height: 48px; }
        .button { display: inline-block; padding: 12px 24px; background-color: #0a7d4f; color: white; text-decoration: none; border-radius: 4px; margin: 20px 0; }
        .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <a href="{{webUrl}}"><img src="{{logoUrl}}" alt="{{appName}}"></a>
        </div>

        {{{content}}}

        <div class="footer">
            <p>Need help? Contact us at <a href="mailto:{{supportEmail}}">{{supportEmail}}</a>.</p>
            <p>&copy; {{currentYear}} {{legalName}}, {{legalAddress}}. All rights reserved.</p>
        </div>
    </div>
</body>
</html>
"#;
