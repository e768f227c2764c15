#[cfg(test)]
mod tests {
    use crate::charts::options::{ChartKind, ChartOption};
    use crate::charts::{merge_update, MergeOutcome};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use shared::ChartUpdate;

    const KINDS: [ChartKind; 4] = [ChartKind::Radar, ChartKind::Bar, ChartKind::Pie, ChartKind::Line];

    fn category_count(option: &ChartOption) -> Option<usize> {
        option.as_value()["xAxis"]["data"].as_array().map(Vec::len)
    }

    #[test]
    fn test_default_options_are_complete() {
        for kind in KINDS {
            let option = kind.default_option();
            let value = option.as_value();

            assert!(value["title"]["text"].is_string(), "{} has no title", kind);
            assert!(value["tooltip"]["trigger"].is_string(), "{} has no tooltip", kind);

            let series = value["series"].as_array().expect("series array");
            assert!(!series.is_empty(), "{} has no series", kind);
            for s in series {
                assert_eq!(s["type"], Value::from(kind.as_str()));
                assert!(s["data"].is_array(), "{} series without data", kind);
            }
        }
    }

    #[test]
    fn test_axis_charts_keep_data_aligned_with_categories() {
        for kind in [ChartKind::Bar, ChartKind::Line] {
            let option = kind.default_option();
            let categories = category_count(&option).expect("category axis");
            for s in option.as_value()["series"].as_array().unwrap() {
                assert_eq!(s["data"].as_array().unwrap().len(), categories, "{}", kind);
            }
        }
    }

    #[test]
    fn test_default_options_are_deterministic() {
        for kind in KINDS {
            assert_eq!(kind.default_option(), kind.default_option());
        }
    }

    #[test]
    fn test_remote_bar_payload_keeps_alignment() {
        let mut option = ChartKind::Bar.default_option();
        let update = ChartUpdate::from_json(
            r#"{"type":"bar","categories":["a","b","c"],"values":[91,82,40]}"#,
        )
        .unwrap();

        assert_eq!(merge_update(&mut option, &update).unwrap(), MergeOutcome::Applied);
        assert_eq!(category_count(&option), Some(3));
        assert_eq!(option.as_value()["series"][0]["data"].as_array().unwrap().len(), 3);
    }
}
