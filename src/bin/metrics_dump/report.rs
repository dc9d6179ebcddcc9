// Text rendering and footing audit for the metrics dump
// Every breakdown column is checked against the total it was allocated from

use std::fmt::Write;

use storefront_metrics::format::{currency, grouped};
use storefront_metrics::Dashboard;

// ─── Sections ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Projection,
    Seo,
    Engagement,
    Daily,
    Categories,
    Products,
    Sources,
    Funnel,
    States,
    Keywords,
}

impl Section {
    pub const NAMES: [&'static str; 11] = [
        "summary", "projection", "seo", "engagement", "daily", "categories", "products",
        "sources", "funnel", "states", "keywords",
    ];

    const ALL: [Section; 11] = [
        Self::Summary,
        Self::Projection,
        Self::Seo,
        Self::Engagement,
        Self::Daily,
        Self::Categories,
        Self::Products,
        Self::Sources,
        Self::Funnel,
        Self::States,
        Self::Keywords,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name.trim()))
            .map(|i| Self::ALL[i])
    }

    pub fn to_json(&self, d: &Dashboard) -> Result<String, String> {
        let value = match self {
            Self::Summary => serde_json::to_value(&d.summary),
            Self::Projection => serde_json::to_value(&d.revenue_projection),
            Self::Seo => serde_json::to_value(&d.seo_geo),
            Self::Engagement => serde_json::to_value(&d.engagement),
            Self::Daily => serde_json::to_value(&d.daily),
            Self::Categories => serde_json::to_value(&d.categories),
            Self::Products => serde_json::to_value(&d.top_products),
            Self::Sources => serde_json::to_value(&d.traffic_sources),
            Self::Funnel => serde_json::to_value(&d.funnel),
            Self::States => serde_json::to_value(&d.states),
            Self::Keywords => serde_json::to_value(&d.keywords),
        };
        value
            .and_then(|v| serde_json::to_string_pretty(&v))
            .map_err(|e| e.to_string())
    }

    pub fn render(&self, d: &Dashboard) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, d);
        out
    }

    fn write_to(&self, out: &mut String, d: &Dashboard) -> std::fmt::Result {
        match self {
            Self::Summary => {
                let s = &d.summary;
                writeln!(out, "  Summary ({} mode, period ending {})", d.mode, d.period_end)?;
                writeln!(out, "    Revenue        {:>12}", currency(s.total_revenue as i64))?;
                writeln!(out, "    Orders         {:>12}", grouped(s.total_orders))?;
                writeln!(out, "    Visitors       {:>12}", grouped(s.total_visitors))?;
                writeln!(out, "    AOV            {:>12.2}", s.average_order_value)?;
                writeln!(out, "    Conversion     {:>11.1}%", s.conversion_rate)?;
                writeln!(out, "    Subscribers    {:>12}", grouped(s.email_subscribers))?;
                writeln!(out, "    MoM growth     {:>11.1}%", s.month_over_month_growth)?;
            }
            Self::Projection => {
                let (c, p) = (&d.revenue_projection.current, &d.revenue_projection.projected);
                writeln!(out, "  Revenue Projection")?;
                pair_row(out, "", "Current".into(), "Projected".into())?;
                pair_row(
                    out,
                    "Visitors",
                    grouped(c.monthly_visitors),
                    grouped(p.monthly_visitors),
                )?;
                pair_row(
                    out,
                    "Conversion",
                    format!("{:.1}%", c.conversion_rate),
                    format!("{:.1}%", p.conversion_rate),
                )?;
                pair_row(
                    out,
                    "AOV",
                    format!("{:.2}", c.average_order_value),
                    format!("{:.2}", p.average_order_value),
                )?;
                pair_row(
                    out,
                    "Monthly",
                    currency(c.monthly_revenue as i64),
                    currency(p.monthly_revenue as i64),
                )?;
                pair_row(
                    out,
                    "Annual",
                    currency(c.annual_revenue as i64),
                    currency(p.annual_revenue as i64),
                )?;
                for imp in &d.revenue_projection.improvements {
                    let amount = currency(imp.revenue);
                    writeln!(out, "    + {:<30} {:>12}  {}", imp.area, amount, imp.impact)?;
                }
            }
            Self::Seo => {
                let s = &d.seo_geo;
                writeln!(out, "  SEO / GEO            Current   Projected")?;
                seo_row(
                    out,
                    "Organic traffic",
                    grouped(s.organic_traffic),
                    grouped(s.projected_organic_traffic),
                )?;
                seo_row(
                    out,
                    "Authority score",
                    format!("{:.0}", s.authority_score),
                    format!("{:.0}", s.projected_authority_score),
                )?;
                seo_row(
                    out,
                    "Ranking keywords",
                    grouped(s.ranking_keywords),
                    grouped(s.projected_ranking_keywords),
                )?;
                seo_row(
                    out,
                    "Top-10 keywords",
                    s.top_ten_keywords.to_string(),
                    s.projected_top_ten_keywords.to_string(),
                )?;
                seo_row(
                    out,
                    "Local SEO",
                    format!("{:.0}", s.local_seo_score),
                    format!("{:.0}", s.projected_local_seo_score),
                )?;
                seo_row(
                    out,
                    "Technical SEO",
                    format!("{:.0}", s.technical_seo_score),
                    format!("{:.0}", s.projected_technical_seo_score),
                )?;
                seo_row(
                    out,
                    "Content",
                    format!("{:.0}", s.content_score),
                    format!("{:.0}", s.projected_content_score),
                )?;
                let missing = currency(s.missing_traffic_value as i64);
                writeln!(out, "    Missing traffic value: {missing}/mo")?;
            }
            Self::Engagement => {
                let e = &d.engagement;
                writeln!(out, "  Engagement")?;
                writeln!(out, "    Subscribers       {}", grouped(e.email_subscribers))?;
                writeln!(out, "    Cart abandonment  {:.1}%", e.cart_abandonment_rate)?;
                writeln!(
                    out,
                    "    Checkout drop-off {:.1}% (industry {:.1}-{:.1}%, {:?})",
                    e.checkout_dropoff_rate,
                    e.industry_dropoff_low,
                    e.industry_dropoff_high,
                    e.standing
                )?;
            }
            Self::Daily => {
                writeln!(
                    out,
                    "  {:<11} {:<4} {:>8} {:>7} {:>10} {:>8} {:>6} {:>6}",
                    "Date", "Day", "Visitors", "Orders", "Revenue", "AOV", "Cart", "Chkout"
                )?;
                for day in &d.daily {
                    writeln!(
                        out,
                        "  {:<11} {:<4} {:>8} {:>7} {:>10} {:>8.1} {:>6} {:>6}",
                        day.date,
                        day.weekday,
                        day.visitors,
                        day.orders,
                        day.revenue,
                        day.average_order_value,
                        day.add_to_cart,
                        day.checkout
                    )?;
                }
            }
            Self::Categories => {
                for c in &d.categories {
                    writeln!(
                        out,
                        "  {:<28} {:>10} {:>5} orders {:>5.1}%",
                        c.category,
                        currency(c.revenue as i64),
                        c.orders,
                        c.share
                    )?;
                }
            }
            Self::Products => {
                for p in &d.top_products {
                    writeln!(
                        out,
                        "  {:<28} {:>4} x {:>7} = {:>10}",
                        p.name,
                        p.units_sold,
                        currency(p.price as i64),
                        currency(p.revenue as i64)
                    )?;
                }
            }
            Self::Sources => {
                for s in &d.traffic_sources {
                    writeln!(
                        out,
                        "  {:<16} {:>7} visitors {:>4} orders {:>10} {:>5.1}% conv",
                        s.source,
                        s.visitors,
                        s.orders,
                        currency(s.revenue as i64),
                        s.conversion_rate
                    )?;
                }
            }
            Self::Funnel => {
                for step in &d.funnel {
                    writeln!(
                        out,
                        "  {:<16} {:>8} {:>6.1}% of top, -{:.1}%",
                        step.stage, step.count, step.percentage, step.drop_off
                    )?;
                }
            }
            Self::States => {
                for s in &d.states {
                    writeln!(
                        out,
                        "  {:<3} {:<16} {:>7} visitors {:>4} orders {:>10}",
                        s.code,
                        s.state,
                        s.visitors,
                        s.orders,
                        currency(s.revenue as i64)
                    )?;
                }
            }
            Self::Keywords => {
                for k in &d.keywords {
                    writeln!(
                        out,
                        "  {:<30} #{:<3} -> #{:<3} {:>6} -> {:>6} visits",
                        k.keyword,
                        k.current_position,
                        k.projected_position,
                        k.current_traffic,
                        k.projected_traffic
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn pair_row(out: &mut String, label: &str, current: String, projected: String) -> std::fmt::Result {
    writeln!(out, "    {label:<14} {current:>12} {projected:>12}")
}

fn seo_row(out: &mut String, label: &str, current: String, projected: String) -> std::fmt::Result {
    writeln!(out, "    {label:<16} {current:>10} {projected:>11}")
}

pub fn render_full(d: &Dashboard) -> String {
    Section::ALL
        .iter()
        .map(|s| s.render(d))
        .collect::<Vec<_>>()
        .join("\n")
}

// ─── Footing Audit ──────────────────────────────────────────────────────────

fn total(values: impl Iterator<Item = u64>) -> i128 {
    values.map(i128::from).sum()
}

#[derive(Debug, Clone)]
pub struct FootingCheck {
    pub label: &'static str,
    pub expected: i128,
    pub actual: i128,
}

impl FootingCheck {
    fn new(label: &'static str, expected: i128, actual: i128) -> Self {
        Self { label, expected, actual }
    }

    pub fn passes(&self) -> bool {
        self.expected == self.actual
    }
}

/// Every allocated column against its governing total.
#[derive(Debug, Clone)]
pub struct FootingAudit {
    pub checks: Vec<FootingCheck>,
    pub funnel_monotonic: bool,
}

impl FootingAudit {
    pub fn run(d: &Dashboard) -> Self {
        let visitors = i128::from(d.summary.total_visitors);
        let orders = i128::from(d.summary.total_orders);
        let revenue = i128::from(d.summary.total_revenue);

        let p = &d.revenue_projection;
        let checks = vec![
            FootingCheck::new(
                "daily visitors",
                visitors,
                total(d.daily.iter().map(|x| x.visitors)),
            ),
            FootingCheck::new("daily orders", orders, total(d.daily.iter().map(|x| x.orders))),
            FootingCheck::new("daily revenue", revenue, total(d.daily.iter().map(|x| x.revenue))),
            FootingCheck::new(
                "category revenue",
                revenue,
                total(d.categories.iter().map(|x| x.revenue)),
            ),
            FootingCheck::new(
                "category orders",
                orders,
                total(d.categories.iter().map(|x| x.orders)),
            ),
            FootingCheck::new(
                "source visitors",
                visitors,
                total(d.traffic_sources.iter().map(|x| x.visitors)),
            ),
            FootingCheck::new(
                "source orders",
                orders,
                total(d.traffic_sources.iter().map(|x| x.orders)),
            ),
            FootingCheck::new(
                "source revenue",
                revenue,
                total(d.traffic_sources.iter().map(|x| x.revenue)),
            ),
            FootingCheck::new(
                "state visitors",
                visitors,
                total(d.states.iter().map(|x| x.visitors)),
            ),
            FootingCheck::new("state orders", orders, total(d.states.iter().map(|x| x.orders))),
            FootingCheck::new("state revenue", revenue, total(d.states.iter().map(|x| x.revenue))),
            FootingCheck::new(
                "improvement uplift",
                i128::from(p.projected.monthly_revenue) - i128::from(p.current.monthly_revenue),
                p.improvements.iter().map(|i| i128::from(i.revenue)).sum(),
            ),
        ];

        let funnel_monotonic = d.funnel.windows(2).all(|w| w[1].count <= w[0].count)
            && d.funnel.first().map_or(true, |s| s.drop_off == 0.0);

        Self { checks, funnel_monotonic }
    }

    pub fn all_pass(&self) -> bool {
        self.funnel_monotonic && self.checks.iter().all(FootingCheck::passes)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("  Footing Audit\n");
        for c in &self.checks {
            out.push_str(&format!(
                "    {:<20} expected {:>10} got {:>10}  {}\n",
                c.label,
                c.expected,
                c.actual,
                if c.passes() { "PASS" } else { "FAIL" }
            ));
        }
        out.push_str(&format!(
            "    {:<20} {}\n",
            "funnel monotonic",
            if self.funnel_monotonic { "PASS" } else { "FAIL" }
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_metrics::MetricsEngine;

    #[test]
    fn section_names_round_trip() {
        for (name, section) in Section::NAMES.iter().zip(Section::ALL) {
            assert_eq!(Section::parse(name), Some(section));
        }
        assert_eq!(Section::parse(" FUNNEL "), Some(Section::Funnel));
        assert_eq!(Section::parse("ledger"), None);
    }

    #[test]
    fn fallback_dashboard_passes_audit() {
        let audit = FootingAudit::run(&MetricsEngine::default().dashboard());
        assert!(audit.all_pass(), "{}", audit.render());
    }

    #[test]
    fn full_render_covers_every_section() {
        let text = render_full(&MetricsEngine::default().dashboard());
        assert!(text.contains("Revenue Projection"));
        assert!(!text.contains("Footing"));
        assert!(text.contains("2025-06-30"));
    }
}
