use crate::metrics::{kpis, most_common_category};
use crate::types::{ActionItem, Complaint, GroupPerformance, Insights, Priority};
use crate::util::format_int;

/// Standing policy suggestions shown with every report. These are not
/// derived from the data.
pub const RECOMMENDATIONS: [&str; 6] = [
    "Implement online appointment systems to reduce queue times",
    "Conduct staff training focused on customer service excellence",
    "Digitize more services to reduce physical office visits",
    "Share best practices from top-performing departments",
    "Establish real-time performance monitoring systems",
    "Create streamlined citizen feedback collection mechanisms",
];

fn action(priority: Priority, action: String, timeline: &str, impact: Priority) -> ActionItem {
    ActionItem {
        priority,
        action,
        timeline: timeline.to_string(),
        expected_impact: impact,
    }
}

/// Build findings, recommendations and action items for a complaint subset
/// and its department ranking (best first).
pub fn generate_insights(complaints: &[Complaint], departments: &[GroupPerformance]) -> Insights {
    if complaints.is_empty() {
        return Insights::default();
    }

    let k = kpis(complaints);
    let top_category = most_common_category(complaints);
    let best = departments.first().map(|d| d.group.as_str());
    let worst = departments.last().map(|d| d.group.as_str());

    let mut key_findings = vec![
        format!("Total of {} complaints processed", format_int(k.total_complaints)),
        format!("Average citizen satisfaction: {:.1}/5", k.avg_satisfaction),
        format!("Resolution rate: {:.1}%", k.resolution_rate),
        format!("Average resolution time: {:.1} days", k.avg_resolution_time),
    ];
    if let Some(category) = &top_category {
        key_findings.push(format!("Most common complaint: {category}"));
    }
    if let (Some(best), Some(worst)) = (best, worst) {
        key_findings.push(format!("Best performing department: {best}"));
        key_findings.push(format!("Department needing attention: {worst}"));
    }

    let mut action_items = Vec::new();
    if let Some(worst) = worst {
        action_items.push(action(
            Priority::High,
            format!("Address performance issues in {worst}"),
            "1 month",
            Priority::High,
        ));
    }
    if let Some(category) = &top_category {
        action_items.push(action(
            Priority::Medium,
            format!("Implement solutions for {category} issues"),
            "2 months",
            Priority::Medium,
        ));
    }
    action_items.push(action(
        Priority::Medium,
        "Launch comprehensive staff training program".to_string(),
        "3 months",
        Priority::High,
    ));
    action_items.push(action(
        Priority::Low,
        "Expand digital service offerings".to_string(),
        "6 months",
        Priority::Medium,
    ));

    Insights {
        key_findings,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        action_items,
    }
}
