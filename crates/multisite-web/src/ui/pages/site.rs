//! Public site page.
//!
//! [`SiteTemplate`] is the presentational template: name, contact number,
//! logo and description in, markup out. [`SitePage`] wraps it in a document
//! and adds the script that listens to the realtime gateway.

use dioxus::prelude::*;
use multisite_core::whatsapp_link;

/// Logo shown when a site has none
pub const DEFAULT_LOGO: &str = "/placeholder.svg";

/// Description shown when a site has none
pub const DEFAULT_DESCRIPTION: &str = "Get your ID instantly — claim an extra welcome bonus";

const SITE_STYLES: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
    background: linear-gradient(135deg, #0f172a 0%, #1e293b 100%);
    color: #f8fafc;
}
.site-card {
    width: 100%;
    max-width: 420px;
    margin: 1.5rem;
    padding: 2.5rem 2rem;
    border-radius: 1.25rem;
    background: rgba(15, 23, 42, 0.85);
    box-shadow: 0 20px 45px rgba(0, 0, 0, 0.35);
    text-align: center;
}
.site-logo { width: 96px; height: 96px; border-radius: 50%; object-fit: cover; background: #334155; }
.site-name { margin: 1.25rem 0 0.5rem; font-size: 1.75rem; }
.site-description { margin: 0 0 2rem; color: #cbd5e1; }
.site-cta {
    display: block;
    padding: 0.9rem 1.25rem;
    border-radius: 999px;
    background: #22c55e;
    color: #052e16;
    font-weight: 700;
    text-decoration: none;
}
.site-cta:hover { background: #16a34a; }
.site-note { margin-top: 1rem; font-size: 0.85rem; color: #94a3b8; }
"#;

/// Listens for `SITE_UPDATE` dispatches and rewrites the name and link in
/// place. The connection is not retried once it closes.
const REALTIME_SCRIPT: &str = r#"
(function () {
    var root = document.querySelector('[data-realtime-url]');
    if (!root || !('WebSocket' in window)) return;

    var socket;
    try {
        socket = new WebSocket(root.getAttribute('data-realtime-url'));
    } catch (err) {
        console.warn('Realtime updates unavailable:', err);
        return;
    }

    var heartbeat = null;
    var lastSeq = null;

    function applyUpdate(data) {
        if (!data || data.domain !== root.getAttribute('data-domain')) return;
        var name = root.querySelector('[data-site-name]');
        if (name && typeof data.site_name === 'string') {
            name.textContent = data.site_name;
            document.title = data.site_name;
        }
        var link = root.querySelector('[data-whatsapp-link]');
        if (link && typeof data.whatsapp_number === 'string') {
            link.setAttribute('href', 'https://wa.me/' + data.whatsapp_number.replace(/\D/g, ''));
        }
    }

    socket.onmessage = function (msg) {
        var frame;
        try { frame = JSON.parse(msg.data); } catch (err) { return; }
        if (typeof frame.s === 'number') lastSeq = frame.s;

        if (frame.op === 10) {
            var interval = (frame.d && frame.d.heartbeat_interval) || 45000;
            heartbeat = setInterval(function () {
                socket.send(JSON.stringify({ op: 1, d: lastSeq }));
            }, interval);
        } else if (frame.op === 0 && frame.t === 'SITE_UPDATE') {
            applyUpdate(frame.d);
        }
    };

    socket.onclose = function () {
        if (heartbeat) clearInterval(heartbeat);
    };
})();
"#;

#[derive(Props, Clone, PartialEq)]
pub struct SiteTemplateProps {
    pub site_name: String,
    pub whatsapp_number: String,
    #[props(default = DEFAULT_LOGO.to_string())]
    pub logo: String,
    #[props(default = DEFAULT_DESCRIPTION.to_string())]
    pub description: String,
}

/// The landing card every public site shows.
#[component]
pub fn SiteTemplate(props: SiteTemplateProps) -> Element {
    let link = whatsapp_link(&props.whatsapp_number);

    rsx! {
        section { class: "site-card",
            img { class: "site-logo", src: "{props.logo}", alt: "{props.site_name} logo" }
            h1 { class: "site-name", "data-site-name": "true", "{props.site_name}" }
            p { class: "site-description", "{props.description}" }
            a {
                class: "site-cta",
                "data-whatsapp-link": "true",
                href: "{link}",
                target: "_blank",
                rel: "noopener noreferrer",
                "Get ID & Extra Bonus"
            }
            p { class: "site-note", "You'll be redirected to WhatsApp." }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct SitePageProps {
    pub domain: String,
    pub site_name: String,
    pub whatsapp_number: String,
    /// Gateway URL the page listens on
    pub realtime_url: String,
}

#[component]
pub fn SitePage(props: SitePageProps) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{props.site_name}" }
            style { {SITE_STYLES} }
        }
        body {
            main {
                "data-domain": "{props.domain}",
                "data-realtime-url": "{props.realtime_url}",
                SiteTemplate {
                    site_name: props.site_name.clone(),
                    whatsapp_number: props.whatsapp_number.clone(),
                }
            }
            script { dangerous_inner_html: REALTIME_SCRIPT }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, number: &str) -> String {
        dioxus::ssr::render_element(rsx! {
            SiteTemplate {
                site_name: name.to_string(),
                whatsapp_number: number.to_string(),
            }
        })
    }

    #[test]
    fn test_template_uses_defaults() {
        let html = template("Alpha", "+1 (555) 010-2030");

        assert!(html.contains("https://wa.me/15550102030"));
        assert!(html.contains(DEFAULT_LOGO));
        assert!(html.contains(DEFAULT_DESCRIPTION));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains("Extra Bonus"));
    }

    #[test]
    fn test_template_custom_logo_and_description() {
        let html = dioxus::ssr::render_element(rsx! {
            SiteTemplate {
                site_name: "Beta".to_string(),
                whatsapp_number: "+44 20 7946 0000".to_string(),
                logo: "/logos/beta.png".to_string(),
                description: "Play now".to_string(),
            }
        });

        assert!(html.contains("/logos/beta.png"));
        assert!(html.contains("Play now"));
        assert!(!html.contains(DEFAULT_LOGO));
        assert!(html.contains("https://wa.me/442079460000"));
    }

    #[test]
    fn test_template_is_pure() {
        assert_eq!(template("Gamma", "+1234"), template("Gamma", "+1234"));
    }
}
