use serde::Serialize;

use crate::models::course::Course;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Provider name, used as the point label.
    pub name: String,
    pub price: f64,
    pub score: f64,
    pub full_name: String,
}

/// Scatter plot of price against average score increase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
}

/// `None` for an empty course list; there is nothing to plot.
pub fn render_chart(courses: &[Course]) -> Option<ChartView> {
    if courses.is_empty() {
        return None;
    }

    Some(ChartView {
        title: "Value Analysis: Cost vs. Score Impact",
        x_label: "Price ($)",
        y_label: "Avg. Points Gained",
        points: courses
            .iter()
            .map(|c| ChartPoint {
                name: c.provider.clone(),
                price: c.price,
                score: c.average_score_increase,
                full_name: c.name.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::courses::tests::course_json;

    #[test]
    fn test_empty_courses_render_no_chart() {
        assert!(render_chart(&[]).is_none());
    }

    #[test]
    fn test_one_point_per_course() {
        let courses: Vec<Course> = vec![
            serde_json::from_value(course_json("a", 300.0, 90.0)).unwrap(),
            serde_json::from_value(course_json("b", 1200.0, 210.0)).unwrap(),
        ];
        let chart = render_chart(&courses).unwrap();

        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[1].name, "Provider b");
        assert_eq!(chart.points[1].full_name, "Course b");
        assert!((chart.points[1].price - 1200.0).abs() < f64::EPSILON);
        assert!((chart.points[1].score - 210.0).abs() < f64::EPSILON);
    }
}
