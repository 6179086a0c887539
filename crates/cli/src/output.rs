use spf_flattener_domain::spf::MAX_DNS_LOOKUPS;
use spf_flattener_domain::SpfReport;
use std::fmt::Write;

pub fn render_text(report: &SpfReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Original SPF Record: {}", report.original);
    let _ = writeln!(out, "Expanded SPF Record: {}", report.expanded);
    let _ = writeln!(out, "Flattened SPF Record: {}", report.flattened);
    let _ = writeln!(
        out,
        "DNS Lookups: {} original, {} flattened (limit {})",
        report.original_lookups, report.flattened_lookups, MAX_DNS_LOOKUPS
    );

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    out
}

pub fn render_json(report: &SpfReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
