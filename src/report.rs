use crate::snapshot::{GitServerStat, HealthSnapshot, ProbeResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Pretty-print any serializable value with 2-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\": \"{err}\"}}"))
}

/// Structured rendering of a snapshot: stable key order, 2-space indent.
pub fn render_json(snapshot: &HealthSnapshot) -> String {
    to_pretty_json(snapshot)
}

/// Plain-text multi-section report. Total over any snapshot: failed probes
/// render as ERROR / N/A lines instead of aborting.
pub fn render_text(snapshot: &HealthSnapshot) -> String {
    let mut lines = vec!["=== System Health Report ===".to_string()];
    lines.push(format!("Generated: {}", snapshot.timestamp));
    lines.push(String::new());

    lines.push("1. OpenClaw System".to_string());
    match &snapshot.openclaw_status {
        ProbeResult::Failed { error } => lines.push(format!("   Status: ERROR - {error}")),
        ProbeResult::Ok(status) if status.is_empty() => {
            lines.push("   Status: UNKNOWN".to_string())
        }
        ProbeResult::Ok(status) => {
            lines.push("   Status: OPERATIONAL".to_string());
            for (key, value) in status {
                lines.push(format!("   {key}: {value}"));
            }
        }
    }

    lines.push(String::new());
    lines.push("2. Gateway".to_string());
    match &snapshot.gateway {
        ProbeResult::Failed { error } => lines.push(format!("   Status: ERROR - {error}")),
        ProbeResult::Ok(report) if report.output.to_lowercase().contains("running") => {
            lines.push("   Status: RUNNING".to_string())
        }
        ProbeResult::Ok(report) if !report.output.is_empty() => {
            lines.push(format!("   Status: {}", report.output))
        }
        ProbeResult::Ok(_) => lines.push("   Status: UNKNOWN".to_string()),
    }

    lines.push(String::new());
    lines.push("3. Git Servers".to_string());
    for (name, server) in &snapshot.git_servers {
        let label = if server.status {
            "✓ ONLINE"
        } else {
            "✗ OFFLINE"
        };
        lines.push(format!(
            "   {} (port {}): {}",
            capitalize(name),
            server.port,
            label
        ));
    }

    lines.push(String::new());
    lines.push("4. System Resources".to_string());
    match &snapshot.disk {
        ProbeResult::Ok(disk) => {
            lines.push(format!("   Disk Usage: {}%", disk.percent_used));
            lines.push(format!("   Free Space: {} GB", disk.free_gb));
        }
        ProbeResult::Failed { .. } => {
            lines.push("   Disk Usage: N/A".to_string());
            lines.push("   Free Space: N/A".to_string());
        }
    }
    match &snapshot.memory {
        ProbeResult::Ok(memory) => {
            lines.push(format!("   Memory Usage: {}%", memory.percent_used));
            lines.push(format!("   Available Memory: {} GB", memory.available_gb));
        }
        ProbeResult::Failed { .. } => {
            lines.push("   Memory Usage: N/A".to_string());
            lines.push("   Available Memory: N/A".to_string());
        }
    }

    lines.join("\n")
}

/// Self-contained HTML dashboard: inline stylesheet, no external resources.
/// Every missing or failed value is shown as Unknown / N/A.
pub fn render_html(snapshot: &HealthSnapshot) -> String {
    let openclaw_value = match &snapshot.openclaw_status {
        ProbeResult::Ok(status) => status
            .get("Status")
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string()),
        ProbeResult::Failed { .. } => "Unknown".to_string(),
    };
    let gateway_value = match &snapshot.gateway {
        ProbeResult::Ok(report) if !report.output.is_empty() => report.output.clone(),
        _ => "Unknown".to_string(),
    };

    let forgejo_status = service_status(&snapshot.git_servers, "forgejo");
    let gitea_status = service_status(&snapshot.git_servers, "gitea");

    let (disk_percent, disk_detail) = match &snapshot.disk {
        ProbeResult::Ok(disk) => (
            format!("{}%", disk.percent_used),
            format!("{} GB / {} GB", disk.used_gb, disk.total_gb),
        ),
        ProbeResult::Failed { .. } => ("N/A".to_string(), "N/A".to_string()),
    };
    let (memory_percent, memory_detail) = match &snapshot.memory {
        ProbeResult::Ok(memory) => (
            format!("{}%", memory.percent_used),
            format!("{} GB / {} GB", memory.used_gb, memory.total_gb),
        ),
        ProbeResult::Failed { .. } => ("N/A".to_string(), "N/A".to_string()),
    };

    let service_rows: String = snapshot
        .git_servers
        .iter()
        .map(|(name, server)| {
            format!(
                "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&capitalize(name)),
                server.port,
                if server.status { "Online" } else { "Offline" }
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>OpenClaw Health Report</title>
  <style>
    body {{ font-family: 'Inter', system-ui, -apple-system, sans-serif; margin: 2rem; background: #0f172a; color: #e2e8f0; }}
    h1 {{ font-size: 1.75rem; margin-bottom: 0.5rem; }}
    .timestamp {{ color: #94a3b8; margin-bottom: 1.5rem; }}
    section {{ margin-bottom: 2rem; padding: 1.5rem; background: #1e293b; border-radius: 1rem; box-shadow: 0 8px 20px rgba(15,23,42,0.6); }}
    table {{ width: 100%; border-collapse: collapse; margin-top: 1rem; }}
    th, td {{ padding: 0.75rem 1rem; border-bottom: 1px solid #334155; text-align: left; }}
    th {{ color: #94a3b8; text-transform: uppercase; font-size: 0.75rem; letter-spacing: 0.08em; }}
    .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; margin-top: 1rem; }}
    .card {{ background: #0f172a; padding: 1rem; border-radius: 0.75rem; border: 1px solid #1f2937; }}
    .value {{ font-size: 1.5rem; font-weight: 600; }}
    .label {{ color: #94a3b8; text-transform: uppercase; letter-spacing: 0.08em; font-size: 0.7rem; }}
  </style>
</head>
<body>
  <h1>OpenClaw Infrastructure Health</h1>
  <div class="timestamp">Generated: {timestamp}</div>

  <section>
    <h2>Platform Status</h2>
    <div class="grid">
      <div class="card">
        <div class="label">OpenClaw</div>
        <div class="value">{openclaw}</div>
      </div>
      <div class="card">
        <div class="label">Gateway</div>
        <div class="value">{gateway}</div>
      </div>
      <div class="card">
        <div class="label">Forgejo</div>
        <div class="value">{forgejo}</div>
      </div>
      <div class="card">
        <div class="label">Gitea</div>
        <div class="value">{gitea}</div>
      </div>
    </div>
  </section>

  <section>
    <h2>Resource Utilization</h2>
    <div class="grid">
      <div class="card">
        <div class="label">Disk Usage</div>
        <div class="value">{disk_percent}</div>
        <div>{disk_detail}</div>
      </div>
      <div class="card">
        <div class="label">Memory Usage</div>
        <div class="value">{memory_percent}</div>
        <div>{memory_detail}</div>
      </div>
    </div>
  </section>

  <section>
    <h2>Git Services</h2>
    <table>
      <thead>
        <tr><th>Service</th><th>Port</th><th>Status</th></tr>
      </thead>
      <tbody>
{service_rows}      </tbody>
    </table>
  </section>
</body>
</html>
"#,
        timestamp = escape(&snapshot.timestamp),
        openclaw = escape(&openclaw_value),
        gateway = escape(&gateway_value),
        forgejo = forgejo_status,
        gitea = gitea_status,
        disk_percent = disk_percent,
        disk_detail = disk_detail,
        memory_percent = memory_percent,
        memory_detail = memory_detail,
        service_rows = service_rows,
    )
}

fn service_status(servers: &BTreeMap<String, GitServerStat>, name: &str) -> &'static str {
    match servers.get(name) {
        Some(server) if server.status => "Online",
        Some(_) => "Offline",
        None => "Unknown",
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
