//! Built-in EWMBA200S "Data & Decisions" syllabus.

use crate::model::curriculum::{CaseStudy, Module};

pub(crate) fn modules() -> Vec<Module> {
    vec![
        Module::from_parts(
            1,
            "Samples & Surveys",
            &[
                "Population of Interest",
                "Sampling Frames",
                "Selection Bias",
                "Non-response Bias",
            ],
            vec![
                CaseStudy::new(
                    "Poll-i-am-a (iOS vs Voters)",
                    "A startup polls 10,000 iOS users to predict the Presidential Election.",
                    [
                        "Sample: 10,000 US iOS users",
                        "Goal: Predict election winner",
                        "Bias: Coverage bias (iOS users != electorate)",
                    ],
                ),
                CaseStudy::new(
                    "Honda EV Survey",
                    "Honda surveys past owners about a new 'e:prototype' electric SUV.",
                    [
                        "Frame: Past Honda owners",
                        "Response Rate: 14%",
                        "72% said they would buy",
                        "Voluntary response bias",
                    ],
                ),
                CaseStudy::new(
                    "Twitter Bot Detection",
                    "Elon Musk samples 100 followers of @twitter to estimate fake accounts.",
                    [
                        "Sample: 100 followers of @twitter",
                        "Method: Replies to math problem",
                        "Bias: Sampling frame is not random users",
                    ],
                ),
            ],
        ),
        Module::from_parts(
            2,
            "Sampling Variation & Quality",
            &["Standard Error", "Confidence Intervals", "Central Limit Theorem"],
            vec![
                CaseStudy::new(
                    "Hitachi Metals Pencils",
                    "Manufacturing high-end pencils with core thickness 3mm.",
                    [
                        "Target: 3mm",
                        "SD: 0.1mm",
                        "Sample: 100 pencils",
                        "Rule: Retool if mean < 2.95 or > 3.05",
                    ],
                ),
                CaseStudy::new(
                    "Haas F1 Lap Times",
                    "Monitoring driver performance to detect anomalies.",
                    [
                        "Mean lap: 82.3s",
                        "SD: 1.3s",
                        "Sample: 3 laps",
                        "Rule: Check if avg < 80.83s or > 83.77s",
                    ],
                ),
            ],
        ),
        Module::from_parts(
            3,
            "Statistical Tests",
            &["Hypothesis Testing", "T-tests", "Type I/II Errors"],
            vec![
                CaseStudy::new(
                    "OpenAI Employee Satisfaction",
                    "Testing if a new compensation plan improved morale.",
                    [
                        "Old Mean: 7.3",
                        "Sample (n=36): 7.6",
                        "Sample SD: 1.1",
                        "One-sided test",
                    ],
                ),
                CaseStudy::new(
                    "ABAG Wastewater",
                    "Testing COVID concentration in sewage.",
                    ["Mean: 240", "SD: 60", "Control limits for 5% Type I error"],
                ),
            ],
        ),
        Module::from_parts(
            4,
            "Linear Patterns",
            &["Correlation vs Causation", "Scatterplots", "Linearity"],
            vec![
                CaseStudy::new(
                    "Rent-the-Chicken",
                    "Weekly spend vs. Yard size.",
                    [
                        "Avg Yard: 0.5 acres",
                        "SD Yard: 0.1",
                        "Avg Spend: $137",
                        "SD Spend: $24",
                        "R^2: 0.42",
                    ],
                ),
                CaseStudy::new(
                    "Spotify Songs",
                    "Song duration vs. Popularity rating.",
                    ["n=18,835", "Slope: -0.414", "P-value: 0.009", "Intercept: 54.5"],
                ),
            ],
        ),
        Module::from_parts(
            5,
            "Simple Regression",
            &["OLS", "Slope Interpretation", "Residuals", "R-squared"],
            vec![
                CaseStudy::new(
                    "Wobb Influencer Marketing",
                    "Ad spend vs Sales.",
                    [
                        "Avg Sales: 24M",
                        "Avg Ad Spend: 28k",
                        "Slope claim: 1k spend -> 1M sales",
                        "Correlation: 0.63",
                    ],
                ),
                CaseStudy::new(
                    "Haagen-Dazs Sales",
                    "Ice cream sales vs Temperature (Celsius).",
                    ["Slope: 21.44", "Intercept: 44.83", "R^2: 0.9797", "n=500"],
                ),
            ],
        ),
        Module::from_parts(
            6,
            "Multiple Regression",
            &["Partial Slopes", "Adjusted R-squared", "Multicollinearity"],
            vec![
                CaseStudy::new(
                    "Fortune 500 Wages",
                    "Wage determined by Education, Experience, Age.",
                    [
                        "log(wage) model",
                        "Educ coef: .072",
                        "Exper coef: .014",
                        "Age coef: .012",
                        "n=935",
                    ],
                ),
                CaseStudy::new(
                    "Biden Campaign 2020",
                    "Votes for Biden vs Votes Counted in Georgia.",
                    [
                        "Slope: 0.2235",
                        "Intercept: 27.68",
                        "R^2: 0.994",
                        "High t-stat: 154.6",
                    ],
                ),
            ],
        ),
        Module::from_parts(
            7,
            "Building Models",
            &["F-tests", "Model Selection", "Standard Error of Regression"],
            vec![
                CaseStudy::new(
                    "EBMUD Water Demand",
                    "Water usage vs Price, Lot Size, Bathrooms.",
                    [
                        "Log-Log model",
                        "Price Elast: -1.567",
                        "Lot Size coef: .469",
                        "Baths coef: .166",
                    ],
                ),
                CaseStudy::new(
                    "Used Car Prices",
                    "ln(Price) vs Odometer.",
                    [
                        "Slope: -0.020",
                        "Intercept: 13.25",
                        "R^2: 0.0035",
                        "Small R^2 but significant slope",
                    ],
                ),
            ],
        ),
        Module::from_parts(
            8,
            "Predictive Analytics",
            &["Prediction Intervals", "Confidence Intervals for Mean"],
            vec![CaseStudy::new(
                "Used Car Prices (Prediction)",
                "Predicting price for a specific car with 50k miles.",
                [
                    "Prediction Interval is wider than Confidence Interval",
                    "Root MSE = 1.17",
                ],
            )],
        ),
        Module::from_parts(
            9,
            "Categorical Variables",
            &["Dummy Variables", "Interaction Terms", "Reference Categories"],
            vec![CaseStudy::new(
                "Wage Gap Analysis",
                "Gender/Race impact on wages.",
                [
                    "Lurking variables",
                    "Correlation between race and education",
                    "Dummy variable trap",
                ],
            )],
        ),
    ]
}
