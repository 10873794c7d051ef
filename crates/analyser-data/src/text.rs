//! Token-level helpers over message text: words, emojis and links.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

fn emoji_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // One char per match: pictographs plus the regional indicators that pair
    // up into flags.
    RE.get_or_init(|| {
        Regex::new(r"[\p{Extended_Pictographic}\x{1F1E6}-\x{1F1FF}]").expect("regex is valid")
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r#"(?i)\b(?:"#,
            r#"https?://[^\s<>"]+"#,
            r#"|www\.[^\s<>"]+"#,
            r#"|(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?P<tld>[a-z]{2,63})\b(?:/[^\s<>"]*)?"#,
            r#")"#,
        ))
        .expect("regex is valid")
    })
}

/// Generic top-level domains recognised on bare (scheme-less) domains.
const GENERIC_TLDS: &str = "\
    com org net edu gov mil int info biz name pro mobi aero asia cat coop jobs \
    museum tel travel app dev page blog shop store online site tech cloud link \
    live news club xyz top icu vip art io ai";

/// Country-code top-level domains.
const COUNTRY_TLDS: &str = "\
    ac ad ae af ag ai al am ao aq ar as at au aw ax az ba bb bd be bf bg bh bi \
    bj bm bn bo br bs bt bw by bz ca cc cd cf cg ch ci ck cl cm cn co cr cu cv \
    cw cx cy cz de dj dk dm do dz ec ee eg er es et eu fi fj fk fm fo fr ga gb \
    gd ge gf gg gh gi gl gm gn gp gq gr gs gt gu gw gy hk hm hn hr ht hu id ie \
    il im in io iq ir is it je jm jo jp ke kg kh ki km kn kp kr kw ky kz la lb \
    lc li lk lr ls lt lu lv ly ma mc md me mg mh mk ml mm mn mo mp mq mr ms mt \
    mu mv mw mx my mz na nc ne nf ng ni nl no np nr nu nz om pa pe pf pg ph pk \
    pl pm pn pr ps pt pw py qa re ro rs ru rw sa sb sc sd se sg sh si sk sl sm \
    sn so sr ss st su sv sx sy sz tc td tf tg th tj tk tl tm tn to tr tt tv tw \
    tz ua ug uk us uy uz va vc ve vg vi vn vu wf ws ye yt za zm zw";

fn is_known_tld(tld: &str) -> bool {
    static TLDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    TLDS.get_or_init(|| {
        GENERIC_TLDS
            .split_whitespace()
            .chain(COUNTRY_TLDS.split_whitespace())
            .collect()
    })
    .contains(tld.to_ascii_lowercase().as_str())
}

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Every emoji character in `text`, in order of appearance.
pub fn emojis(text: &str) -> impl Iterator<Item = &str> {
    emoji_regex().find_iter(text).map(|m| m.as_str())
}

/// Number of URLs in `text`.
///
/// A scheme is optional: `www.` prefixes count, and so do bare domains whose
/// last label is a known generic or country-code top-level domain.  The
/// domain of an email address (`name@example.com`) is not a link.
pub fn link_count(text: &str) -> usize {
    url_regex()
        .captures_iter(text)
        .filter(|caps| {
            let Some(m) = caps.get(0) else {
                return false;
            };
            let in_email = text[..m.start()].ends_with('@') || text[m.end()..].starts_with('@');
            let known = caps.name("tld").map_or(true, |tld| is_known_tld(tld.as_str()));
            !in_email && known
        })
        .count()
}

/// Count `items` and rank them by descending frequency.
///
/// Ties keep first-encounter order.  At most `limit` entries are returned.
pub fn rank_by_frequency<I>(items: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator,
    I::Item: Into<String> + AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in items {
        match index.get(item.as_ref()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                let key: String = item.into();
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // Stable sort keeps encounter order within equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}
