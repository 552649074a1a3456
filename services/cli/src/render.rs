use recruit_reports::reports::{ConsolidatedView, FunnelBucket};

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.1}"))
}

pub(crate) fn render_view(view: &ConsolidatedView) {
    let summary = &view.summary;

    println!("Consolidated recruitment report");
    println!(
        "Generated {} | filter: {} | alias table v{}",
        view.generated_at.format("%Y-%m-%d %H:%M UTC"),
        view.filter,
        view.alias_table_version
    );

    if view.is_empty() {
        println!("\nNo records matched this filter.");
        return;
    }

    println!("\nSummary");
    println!(
        "- {} clients | {} profiles ({} active, {} completed, {}% completion)",
        summary.total_clients,
        summary.total_profiles,
        summary.active_profiles,
        summary.profiles_completed,
        summary.completion_rate
    );
    println!(
        "- {} candidates ({} active, {} hired) | avg match {} | avg days open {}",
        summary.total_candidates,
        summary.active_candidates,
        summary.candidates_hired,
        or_dash(summary.avg_match_percentage),
        or_dash(summary.avg_days_open)
    );

    println!("\nCandidate funnel");
    for bucket in FunnelBucket::ordered() {
        println!("- {}: {}", bucket.label(), summary.funnel.get(bucket));
    }
    if summary.funnel.unbucketed > 0 {
        println!("- Other: {}", summary.funnel.unbucketed);
    }

    if view.alerts.is_empty() {
        println!("\nAttention: none");
    } else {
        println!("\nAttention");
        for alert in &view.alerts {
            println!(
                "- [{}] {}: {}",
                alert.level_label, alert.title, alert.description
            );
        }
    }

    println!("\nClients");
    for client in &view.clients {
        let stats = &client.stats;
        println!(
            "- {}: {} profiles ({} active), {} candidates, {} hired, {}% success",
            client.client.company_name,
            stats.total_profiles,
            stats.active_profiles,
            stats.total_candidates,
            stats.total_candidates_hired,
            stats.success_rate
        );
    }

    println!("\nProfiles");
    for profile in &view.profiles {
        println!(
            "- {} ({}) [{} / {}]: {} candidates, avg match {}",
            profile.profile.title,
            profile.client_name,
            profile.status_label,
            profile.priority_label,
            profile.stats.total_candidates,
            or_dash(profile.stats.avg_match_percentage)
        );
    }

    let quality = &view.data_quality;
    if quality.warnings.is_empty() {
        println!("\nData quality: no warnings ({} notes)", quality.total);
    } else {
        println!("\nData quality");
        for entry in &quality.warnings {
            println!("- {} {}: {}", entry.entity, entry.kind.label(), entry.detail);
        }
    }
}
