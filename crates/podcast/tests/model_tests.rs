// ABOUTME: Integration tests for Channel/Episode construction from loosely-typed JSON input.
// ABOUTME: Covers coercion, defaults, enum checks, timestamp parsing, category shapes and error paths.

use chrono::{FixedOffset, TimeZone};
use podcast_rss::{
    Category, Channel, Episode, EpisodeType, Podcast, Rule, ShowType, ValidationError,
    DEFAULT_MEDIA_TYPE,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn channel_input() -> Value {
    json!({
        "title": "Show",
        "description": "About the show",
        "language": "en",
        "itunes_image": "https://example.com/art.jpg",
        "itunes_category": "Technology",
        "itunes_explicit": true,
        "episodes": []
    })
}

fn episode_input() -> Value {
    json!({
        "title": "Episode",
        "media_url": "https://cdn.example.com/e.mp3",
        "media_size": 100
    })
}

mod episode_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let ep = Episode::from_value(&episode_input()).unwrap();
        assert_eq!(ep.media_type, DEFAULT_MEDIA_TYPE);
        assert_eq!(ep.link, None);
        assert_eq!(ep.guid, None);
        assert_eq!(ep.pub_date, None);
        assert_eq!(ep.itunes_explicit, None);
        assert_eq!(ep.itunes_episode_type, None);
    }

    #[test]
    fn test_coercion() {
        let ep = Episode::from_value(&json!({
            "title": 42,
            "media_url": "https://cdn.example.com/e.mp3",
            "media_size": "2048",
            "itunes_duration": 1800,
            "itunes_episode": "7",
            "itunes_season": 2.0,
            "itunes_explicit": true,
            "itunes_episode_type": "Bonus"
        }))
        .unwrap();
        assert_eq!(ep.title, "42");
        assert_eq!(ep.media_size, 2048);
        assert_eq!(ep.itunes_duration, Some(1800));
        assert_eq!(ep.itunes_episode, Some(7));
        assert_eq!(ep.itunes_season, Some(2));
        assert_eq!(ep.itunes_explicit, Some(true));
        assert_eq!(ep.itunes_episode_type, Some(EpisodeType::Bonus));
    }

    #[test]
    fn test_pub_date_keeps_offset() {
        let mut input = episode_input();
        input["pub_date"] = json!("2024-03-01T10:00:00-05:00");
        let ep = Episode::from_value(&input).unwrap();

        let expected = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .unwrap();
        assert_eq!(ep.pub_date, Some(expected));
    }

    #[test]
    fn test_malformed_pub_date() {
        let mut input = episode_input();
        input["pub_date"] = json!("the day after tomorrow");
        let err = Episode::from_value(&input).unwrap_err();
        assert_eq!(err.field, "pub_date");
        assert_eq!(err.rule, Rule::InvalidDate("the day after tomorrow".into()));
    }

    #[test]
    fn test_required_fields() {
        for key in ["title", "media_url", "media_size"] {
            let mut input = episode_input();
            input.as_object_mut().unwrap().remove(key);
            let err = Episode::from_value(&input).unwrap_err();
            assert_eq!(err, ValidationError::missing(key));
        }
    }

    #[test]
    fn test_negative_media_size() {
        let mut input = episode_input();
        input["media_size"] = json!(-1);
        let err = Episode::from_value(&input).unwrap_err();
        assert_eq!(err.field, "media_size");
        assert!(matches!(err.rule, Rule::OutOfRange { .. }));
    }

    #[test]
    fn test_invalid_episode_type() {
        let mut input = episode_input();
        input["itunes_episode_type"] = json!("Special");
        let err = Episode::from_value(&input).unwrap_err();
        assert_eq!(err.field, "itunes_episode_type");
        assert_eq!(
            err.rule,
            Rule::InvalidEnum {
                value: "Special".into(),
                allowed: &["Full", "Trailer", "Bonus"],
            }
        );
    }

    #[test]
    fn test_episode_type_members() {
        for (name, expected) in [
            ("Full", EpisodeType::Full),
            ("Trailer", EpisodeType::Trailer),
            ("Bonus", EpisodeType::Bonus),
        ] {
            let mut input = episode_input();
            input["itunes_episode_type"] = json!(name);
            let ep = Episode::from_value(&input).unwrap();
            assert_eq!(ep.itunes_episode_type, Some(expected));
        }
    }

    #[test]
    fn test_episode_type_is_case_sensitive() {
        for name in ["full", "TRAILER", "bonus"] {
            let mut input = episode_input();
            input["itunes_episode_type"] = json!(name);
            let err = Episode::from_value(&input).unwrap_err();
            assert_eq!(err.field, "itunes_episode_type");
        }
    }

    #[test]
    fn test_overflowing_clock_duration_is_invalid() {
        for clock in ["999999999999999999:00", "99999999999999999:00:00"] {
            let mut input = episode_input();
            input["itunes_duration"] = json!(clock);
            let err = Episode::from_value(&input).unwrap_err();
            assert_eq!(err.field, "itunes_duration");
            assert_eq!(err.rule, Rule::InvalidDuration(clock.into()));
        }
    }

    #[test]
    fn test_truthy_strings_are_not_booleans() {
        let mut input = episode_input();
        input["itunes_explicit"] = json!("yes");
        let err = Episode::from_value(&input).unwrap_err();
        assert_eq!(err.field, "itunes_explicit");
    }

    #[test]
    fn test_non_object_input() {
        let err = Episode::from_value(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err.field, "episode");
    }
}

mod channel_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let channel = Channel::from_value(&channel_input()).unwrap();
        assert!(!channel.itunes_block);
        assert!(!channel.itunes_complete);
        assert_eq!(channel.itunes_type, None);
        assert_eq!(channel.itunes_owner, None);
        assert_eq!(
            channel.itunes_category,
            vec![Category::Single("Technology".into())]
        );
        assert!(channel.episodes.is_empty());
    }

    #[test]
    fn test_show_type() {
        let mut input = channel_input();
        input["itunes_type"] = json!("episodic");
        let channel = Channel::from_value(&input).unwrap();
        assert_eq!(channel.itunes_type, Some(ShowType::Episodic));

        input["itunes_type"] = json!("weekly");
        let err = Channel::from_value(&input).unwrap_err();
        assert_eq!(err.field, "itunes_type");
    }

    #[test]
    fn test_owner_is_not_parsed_during_validation() {
        let mut input = channel_input();
        input["itunes_owner"] = json!("definitely not a mailbox");
        let channel = Channel::from_value(&input).unwrap();
        assert_eq!(
            channel.itunes_owner.as_deref(),
            Some("definitely not a mailbox")
        );
    }

    #[test]
    fn test_category_pairs_are_preserved() {
        let mut input = channel_input();
        input["itunes_category"] = json!([["Society & Culture", "Documentary"], "Arts"]);
        let channel = Channel::from_value(&input).unwrap();
        assert_eq!(
            channel.itunes_category,
            vec![
                Category::Pair("Society & Culture".into(), "Documentary".into()),
                Category::Single("Arts".into()),
            ]
        );
    }

    #[test]
    fn test_category_with_three_names_is_rejected() {
        let mut input = channel_input();
        input["itunes_category"] = json!([["Arts", "Design", "Fashion"]]);
        let err = Channel::from_value(&input).unwrap_err();
        assert_eq!(err.field, "itunes_category[0]");
        assert!(matches!(err.rule, Rule::InvalidCategory(_)));
    }

    #[test]
    fn test_empty_category_list_is_rejected() {
        let mut input = channel_input();
        input["itunes_category"] = json!([]);
        assert!(Channel::from_value(&input).is_err());
    }

    #[test]
    fn test_explicit_is_required() {
        let mut input = channel_input();
        input.as_object_mut().unwrap().remove("itunes_explicit");
        let err = Channel::from_value(&input).unwrap_err();
        assert_eq!(err, ValidationError::missing("itunes_explicit"));
    }

    #[test]
    fn test_one_bad_episode_fails_the_channel() {
        let mut input = channel_input();
        let mut bad = episode_input();
        bad["itunes_episode_type"] = json!("Special");
        input["episodes"] = json!([episode_input(), episode_input(), bad]);

        let err = Channel::from_value(&input).unwrap_err();
        assert_eq!(err.field, "episodes[2].itunes_episode_type");
        assert!(err.to_string().contains("Special"));
    }

    #[test]
    fn test_non_object_episode() {
        let mut input = channel_input();
        input["episodes"] = json!(["oops"]);
        let err = Channel::from_value(&input).unwrap_err();
        assert_eq!(err.field, "episodes[0]");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut input = channel_input();
        input["generator"] = json!("something else");
        assert!(Channel::from_value(&input).is_ok());
    }

    #[test]
    fn test_deserialize_routes_through_validation() {
        let channel: Podcast = serde_json::from_value(channel_input()).unwrap();
        assert_eq!(channel.title, "Show");

        let mut bad = channel_input();
        bad["itunes_block"] = json!("true");
        let err = serde_json::from_value::<Channel>(bad).unwrap_err();
        assert!(err.to_string().contains("itunes_block"));
    }

    #[test]
    fn test_from_json_str() {
        let channel = Channel::from_json_str(&channel_input().to_string()).unwrap();
        assert_eq!(channel.language, "en");

        let err = Channel::from_json_str("{not json").unwrap_err();
        assert_eq!(err.field, "channel");
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut input = channel_input();
        input["itunes_category"] = json!([["News", "Tech News"], "Arts"]);
        input["episodes"] = json!([{
            "title": "E",
            "media_url": "https://cdn.example.com/e.mp3",
            "media_size": 10,
            "pub_date": "2024-03-01T10:00:00-05:00",
            "itunes_episode_type": "Trailer"
        }]);
        let channel = Channel::from_value(&input).unwrap();

        let value = serde_json::to_value(&channel).unwrap();
        assert_eq!(value["itunes_category"], json!([["News", "Tech News"], "Arts"]));
        assert_eq!(Channel::from_value(&value).unwrap(), channel);
    }
}
