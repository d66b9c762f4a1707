use std::io::{self, Write};
use thriftwood::domain::dashboard::DashboardComposition;
use thriftwood::domain::settings::AppSettings;
use thriftwood::kernel::Lifetime;

pub(crate) fn dashboard(composition: &DashboardComposition, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", composition.title)?;
    for module in &composition.modules {
        let mark = if module.is_enabled { "on " } else { "off" };
        writeln!(out, "  [{mark}] {:<12} {}", module.id, module.name)?;
    }
    Ok(())
}

pub(crate) fn settings(settings: &AppSettings, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "theme          {}", settings.theme)?;
    writeln!(out, "notifications  {}", settings.notifications)?;
    writeln!(out, "analytics      {}", settings.analytics_enabled)
}

pub(crate) fn capabilities(
    capabilities: &[(&'static str, Lifetime)],
    features: &[&str],
    out: &mut dyn Write,
) -> io::Result<()> {
    for (name, lifetime) in capabilities {
        writeln!(out, "{lifetime:<10} {name}")?;
    }
    writeln!(out, "features: {}", features.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftwood::domain::dashboard::ModuleDescriptor;

    #[test]
    fn dashboard_marks_disabled_modules() {
        let composition = DashboardComposition::new(
            "Board",
            vec![ModuleDescriptor::new("sonarr", "Sonarr", true), ModuleDescriptor::new("lidarr", "Lidarr", false)],
        );
        let mut out = Vec::new();
        dashboard(&composition, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Board\n"));
        assert!(text.contains("[on ] sonarr"));
        assert!(text.contains("[off] lidarr"));
    }

    #[test]
    fn settings_use_snake_case_theme_names() {
        let mut out = Vec::new();
        settings(&AppSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("theme          system"));
        assert!(text.contains("analytics      false"));
    }
}
