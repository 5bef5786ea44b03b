use crate::report::{ReportContext, format_f64_6, format_percent_1, mean, net_extremes};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let mut out = String::new();

    out.push_str("Likert Survey Summary\n");
    out.push_str("=====================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Source: {}\n", ctx.input));
    out.push_str(&format!("Respondents: {}\n", ctx.n_respondents));
    out.push_str(&format!("Scale: {}\n", ctx.scale_labels.join(" < ")));
    out.push_str(&format!(
        "Neutral category: {}\n",
        ctx.neutral_label.as_deref().unwrap_or("none")
    ));
    out.push_str(&format!("Palette: {}\n", ctx.palette.join(" ")));
    if !ctx.groups.is_empty() {
        out.push_str(&format!("Groups: {}\n", ctx.groups.join(", ")));
    }
    out.push_str(&format!("Layout: {}\n\n", ctx.layout));

    out.push_str("2. Questions\n");
    for q in &ctx.questions {
        out.push_str(&format!(
            "{}: negative {} | neutral {} | positive {} | net {} (n={}, missing={})\n",
            q.question,
            format_percent_1(q.negative),
            format_percent_1(q.neutral),
            format_percent_1(q.positive),
            format_f64_6(q.net),
            q.n_valid,
            q.n_missing
        ));
    }
    out.push('\n');

    out.push_str("3. Overview\n");
    if let Some((best, worst)) = net_extremes(&ctx.questions) {
        out.push_str(&format!(
            "Most positive: {} (net {})\n",
            best.question,
            format_f64_6(best.net)
        ));
        out.push_str(&format!(
            "Most negative: {} (net {})\n",
            worst.question,
            format_f64_6(worst.net)
        ));
    }
    let nets = ctx.questions.iter().map(|q| q.net).collect::<Vec<_>>();
    out.push_str(&format!("Mean net score: {}\n", format_f64_6(mean(&nets))));
    out.push_str(&format!("{}\n", sentiment_statement(mean(&nets))));

    if !ctx.skipped.is_empty() {
        out.push_str("\n4. Skipped questions\n");
        for (question, reason) in &ctx.skipped {
            out.push_str(&format!("{question}: {reason}\n"));
        }
    }

    out
}

fn sentiment_statement(net: f64) -> &'static str {
    if net >= 0.20 {
        "Responses lean clearly positive."
    } else if net <= -0.20 {
        "Responses lean clearly negative."
    } else {
        "Responses are broadly balanced."
    }
}
