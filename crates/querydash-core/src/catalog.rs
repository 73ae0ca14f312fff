//! Canned response catalog for local mode
//!
//! Keyword groups are checked in declaration order; the first group with a
//! keyword contained in the query wins, even when a later group also matches.

use crate::types::{ChartKind, ResultPayload};

/// A keyword set and the payload it answers with
pub struct KeywordGroup {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    build: fn() -> ResultPayload,
}

impl KeywordGroup {
    /// `lowered` must already be lower-cased
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }

    pub fn payload(&self) -> ResultPayload {
        (self.build)()
    }
}

static GROUPS: [KeywordGroup; 5] = [
    KeywordGroup {
        name: "sales",
        keywords: &["sales", "revenue"],
        build: sales,
    },
    KeywordGroup {
        name: "customers",
        keywords: &["customer", "client"],
        build: customers,
    },
    KeywordGroup {
        name: "inventory",
        keywords: &["inventory", "stock"],
        build: inventory,
    },
    KeywordGroup {
        name: "orders",
        keywords: &["order"],
        build: orders,
    },
    KeywordGroup {
        name: "products",
        keywords: &["product", "item"],
        build: products,
    },
];

/// Keyword groups in priority order
pub fn groups() -> &'static [KeywordGroup] {
    &GROUPS
}

/// First group matching `lowered`, in priority order
pub fn find(lowered: &str) -> Option<&'static KeywordGroup> {
    GROUPS.iter().find(|g| g.matches(lowered))
}

fn sales() -> ResultPayload {
    ResultPayload::new(
        "Sales Data Analysis",
        "Comprehensive analysis of sales performance across different metrics",
        "Sales have shown a positive trend over the past 6 months, with significant growth in Q2.",
    )
    .with_chart_kind(ChartKind::Line)
    .with_series(
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
        [12000.0, 19000.0, 15000.0, 25000.0, 22000.0, 30000.0],
    )
    .with_metric("Total Sales", "$123,000")
    .with_metric("Average Monthly", "$20,500")
    .with_metric("Growth Rate", "+25%")
    .with_insights([
        "Q2 showed the strongest performance",
        "Monthly growth rate averaged 8%",
        "Peak sales occurred in June",
    ])
}

fn customers() -> ResultPayload {
    ResultPayload::new(
        "Customer Database Analysis",
        "Analysis of customer demographics and purchasing patterns",
        "Customer base shows a strong middle-aged demographic with diverse purchasing patterns.",
    )
    .with_series(
        ["18-25", "26-35", "36-45", "46-55", "55+"],
        [150.0, 300.0, 250.0, 200.0, 100.0],
    )
    .with_metric("Total Customers", "1,000")
    .with_metric("Average Age", "35")
    .with_metric("Active Customers", "850")
    .with_insights([
        "26-35 age group is largest segment",
        "High customer retention rate",
        "Diverse age distribution",
    ])
}

fn inventory() -> ResultPayload {
    ResultPayload::new(
        "Inventory Status Report",
        "Current inventory levels and stock analysis",
        "Inventory levels are well-maintained across all categories with optimal stock levels.",
    )
    .with_series(
        ["Electronics", "Clothing", "Books", "Food", "Sports"],
        [150.0, 300.0, 200.0, 400.0, 250.0],
    )
    .with_metric("Total Items", "1,300")
    .with_metric("Average Stock", "260")
    .with_metric("Stock Value", "$45,000")
    .with_insights([
        "Food category has highest inventory",
        "Electronics show lowest stock levels",
        "Overall inventory health is good",
    ])
}

fn orders() -> ResultPayload {
    ResultPayload::new(
        "Order Analysis",
        "Analysis of order patterns and status",
        "Order processing shows high completion rate with minimal cancellations.",
    )
    .with_chart_kind(ChartKind::Pie)
    .with_series(
        ["Processing", "Completed", "Cancelled", "Pending"],
        [30.0, 150.0, 20.0, 10.0],
    )
    .with_metric("Total Orders", "210")
    .with_metric("Completion Rate", "71.4%")
    .with_metric("Average Value", "$250")
    .with_insights([
        "High order completion rate",
        "Low cancellation rate",
        "Efficient processing system",
    ])
}

fn products() -> ResultPayload {
    ResultPayload::new(
        "Product Analysis",
        "Overview of product categories and performance",
        "Product categories show balanced distribution with strong performance across all sectors.",
    )
    .with_series(
        ["Electronics", "Clothing", "Books", "Food", "Sports"],
        [200.0, 300.0, 150.0, 400.0, 250.0],
    )
    .with_metric("Total Products", "1,300")
    .with_metric("Categories", "5")
    .with_metric("Average Price", "$45")
    .with_insights([
        "Balanced category distribution",
        "Strong product diversity",
        "Competitive pricing strategy",
    ])
}

/// Answer for queries no keyword group recognizes
pub fn default_payload() -> ResultPayload {
    ResultPayload::new(
        "General Analysis",
        "Overview of key business metrics",
        "General overview of business performance across key metrics.",
    )
    .with_series(
        ["Metric 1", "Metric 2", "Metric 3", "Metric 4", "Metric 5"],
        [100.0, 150.0, 200.0, 250.0, 300.0],
    )
    .with_metric("Total Revenue", "$500,000")
    .with_metric("Active Users", "2,500")
    .with_metric("Conversion Rate", "3.2%")
    .with_insights([
        "Overall performance is stable",
        "Positive growth in key metrics",
        "Room for improvement in some areas",
    ])
}
