//! Text rendering for the console.

use crate::network::{CongestionEvent, Latency, Link, RouteReport, FAILED_LINK_LATENCY};

/// Separator line used between console sections.
const RULE: &str = "---------------------------------------------";

/// The main menu.
pub const MENU: &str = "\n===== NETWORK ROUTING OPTIMIZATION MENU =====\n\
1. Find Fastest Data Route\n\
2. Update Link Latency\n\
3. Simulate Link Failure\n\
4. Simulate Random Congestion\n\
5. Display ASCII Network\n\
6. Exit\n";

fn render_latency(latency: Latency) -> String {
    if latency >= FAILED_LINK_LATENCY {
        "DOWN".to_string()
    } else {
        format!("{} ms", latency)
    }
}

/// Renders a path as `[0] --> [1] --> [2]`.
pub fn render_path(path: &[usize]) -> String {
    path.iter()
        .map(|node| format!("[{}]", node))
        .collect::<Vec<_>>()
        .join(" --> ")
}

/// One line per link, failed links shown as `DOWN`.
pub fn render_topology(links: &[Link]) -> String {
    let mut text = String::from("\n=========== NETWORK TOPOLOGY ===========\n\n");
    for link in links {
        text.push_str(&format!(
            "[{}] ==== {} ==== [{}]\n",
            link.from,
            render_latency(link.latency),
            link.to
        ));
    }
    text.push_str(&format!("\n{}\n", RULE));
    text
}

/// Route analysis block for a [`RouteReport`].
///
/// Totals at or above `alert_threshold` are flagged as high latency.
pub fn render_route(report: &RouteReport, alert_threshold: Latency) -> String {
    let Some(distance) = report.distance else {
        return "No route exists.\n".to_string();
    };

    let flag = if distance >= alert_threshold {
        " [HIGH]"
    } else {
        ""
    };
    let mut text = format!(
        "\n{rule}\n              ROUTE ANALYSIS\n{rule}\n\
         Source Server      : {}\n\
         Destination Server : {}\n\n\
         Optimal Path       : {}\n\
         Total Latency      : {} ms{}\n\
         {rule}\n",
        report.source,
        report.destination,
        render_path(&report.path),
        distance,
        flag,
        rule = RULE
    );

    if let Some(delta) = report.comparison {
        text.push_str(&format!(
            "\nPrevious Latency: {} ms\nLatency Change: {:+} ms\n",
            delta.previous, delta.change
        ));
    }

    text
}

/// One line per congestion event.
pub fn render_congestion(events: &[CongestionEvent]) -> String {
    let mut text = String::from("\n>> NETWORK DISTURBANCE SIMULATION INITIATED...\n");
    for event in events {
        text.push_str(&format!(
            "Latency spike between {} and {} (+{} ms)\n",
            event.from, event.to, event.increase
        ));
    }
    text.push_str("Congestion simulation complete.\n");
    text
}

/// Alert printed after a successful failure simulation.
pub fn render_failure(u: usize, v: usize) -> String {
    format!(
        "!!! CRITICAL ALERT: LINK FAILURE DETECTED !!!\nLink {} <-> {} is down.\n",
        u, v
    )
}
