use std::collections::{BTreeSet, HashMap};

/// Alias → canonical search-term table. Built once at startup and handed to
/// the query service; never mutated afterwards.
///
/// The mapping is neither symmetric nor injective: several aliases may point
/// at the same canonical term, so expansion needs both the forward edge and a
/// reverse scan.
#[derive(Debug, Clone)]
pub struct SynonymMap {
    forward: HashMap<String, String>,
}

/// Compiled-in alias table. Mostly colloquial or romanized names for the
/// Chinese storefront brands the two stores list.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    // marketplaces
    ("拼多多", "PDD"),
    ("淘宝", "TB"),
    ("咸鱼", "闲鱼"),
    ("闲鱼", "XY"),
    ("JD", "京东"),
    // video memberships
    ("b站", "哔哩哔哩"),
    ("B站", "哔哩哔哩"),
    ("小破站", "哔哩哔哩"),
    ("iqiyi", "爱奇艺"),
    ("271", "爱奇艺"),
    ("奇异果", "爱奇艺"),
    ("鹅厂", "腾讯"),
    ("youku", "优酷"),
    ("芒果", "芒果TV"),
    ("mg", "芒果TV"),
    ("油管", "YouTube"),
    ("nf", "Netflix"),
    ("南瓜", "南瓜电影"),
    // music & audio
    ("网抑云", "网易云"),
    ("云村", "网易云"),
    ("扣扣音乐", "QQ音乐"),
    ("喜马", "喜马拉雅"),
    ("猫耳", "猫耳FM"),
    // social & messaging
    ("企鹅", "QQ"),
    ("扣扣", "QQ"),
    ("vx", "微信"),
    ("wechat", "微信"),
    ("wb", "微博"),
    ("渣浪", "新浪微博"),
    // phone credit
    ("移动", "移动话费"),
    ("联通", "联通充值"),
    ("电信", "电信充值"),
    ("话费", "充值缴费区"),
    // food & drink
    ("kfc", "肯德基"),
    ("KFC", "肯德基"),
    ("开封菜", "肯德基"),
    ("mcd", "麦当劳"),
    ("MCD", "麦当劳"),
    ("金拱门", "麦当劳"),
    ("luckin", "瑞幸"),
    ("星爸", "星巴克"),
    ("starbucks", "星巴克"),
    ("heytea", "喜茶"),
    ("coco", "CoCo"),
    ("雪王", "蜜雪冰城"),
    ("elm", "饿了么"),
    ("mt", "美团"),
    // cloud storage & tools
    ("度盘", "百度网盘"),
    ("百度云", "百度网盘"),
    ("115", "115网盘"),
    ("梯子", "加速器"),
    ("vpn", "加速器"),
    ("office", "微软office"),
    ("ppt", "WPS"),
    // gaming slang
    ("农药", "王者"),
    ("药水", "王者"),
    ("王者荣耀", "王者点卷"),
    ("吃鸡", "和平点卷"),
    ("和平精英", "和平点卷"),
    ("LOL", "联盟"),
    ("撸啊撸", "联盟"),
    ("英雄联盟", "联盟"),
    ("铲子", "金铲"),
    ("金铲铲", "金铲"),
    ("dnf", "DNF"),
    ("地下城", "DNF"),
    ("cf", "CFM"),
    ("穿越火线", "CFM"),
    // transport & daily life
    ("滴滴", "滴滴出行"),
    ("哈罗", "哈啰"),
    ("打车", "出行"),
    ("e卡", "京东E卡"),
    ("加油", "团油"),
];

impl SynonymMap {
    /// The compiled-in table.
    pub fn builtin() -> Self {
        Self::from_pairs(DEFAULT_SYNONYMS.iter().map(|&(a, c)| (a, c)))
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let forward = pairs
            .into_iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();
        Self { forward }
    }

    /// Expands a raw search term into the set of equivalent terms:
    /// the term itself, its canonical form (if it is an alias), and every
    /// alias that maps to it (reverse lookup). The result feeds an
    /// OR-predicate, so only membership matters; BTreeSet keeps the generated
    /// SQL stable for a given term.
    pub fn expand(&self, term: &str) -> BTreeSet<String> {
        let mut terms = BTreeSet::new();
        terms.insert(term.to_string());
        if let Some(canonical) = self.forward.get(term) {
            terms.insert(canonical.clone());
        }
        for (alias, canonical) in &self.forward {
            if canonical == term {
                terms.insert(alias.clone());
            }
        }
        terms
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_is_reflexive() {
        let map = SynonymMap::builtin();
        for term in ["kfc", "肯德基", "没见过的词"] {
            assert!(map.expand(term).contains(term), "expand({term}) must contain itself");
        }
    }

    #[test]
    fn expand_follows_forward_edge() {
        let map = SynonymMap::builtin();
        assert!(map.expand("kfc").contains("肯德基"));
    }

    #[test]
    fn expand_follows_reverse_edges() {
        let map = SynonymMap::builtin();
        let expanded = map.expand("肯德基");
        // every alias mapping to the canonical term comes back
        assert!(expanded.contains("kfc"));
        assert!(expanded.contains("KFC"));
        assert!(expanded.contains("开封菜"));
    }

    #[test]
    fn expansion_is_symmetric_over_the_whole_table() {
        let map = SynonymMap::builtin();
        for &(alias, canonical) in DEFAULT_SYNONYMS {
            assert!(
                map.expand(alias).contains(canonical),
                "expand({alias}) must contain {canonical}"
            );
            assert!(
                map.expand(canonical).contains(alias),
                "expand({canonical}) must contain {alias}"
            );
        }
    }

    #[test]
    fn ride_hailing_slang_expands_to_travel_category() {
        let map = SynonymMap::builtin();
        assert!(map.expand("打车").contains("出行"));
        assert!(map.expand("出行").contains("打车"));
    }

    #[test]
    fn unknown_term_expands_to_singleton() {
        let map = SynonymMap::from_pairs([("a", "b")]);
        let expanded = map.expand("c");
        assert_eq!(expanded.len(), 1);
        assert!(expanded.contains("c"));
    }
}
