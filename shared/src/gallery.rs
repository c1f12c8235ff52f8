//! 图库布局
//!
//! 响应式列数和每张图片的按钮状态，与具体渲染框架无关。

use std::collections::HashSet;

use crate::collection::ImageCollection;
use crate::image::Image;
use crate::session::Session;

/// 列数断点：宽度不超过该值时使用对应列数
const BREAKPOINTS: &[(u32, usize)] = &[(550, 1), (991, 2)];
const DEFAULT_COLUMNS: usize = 3;

/// 根据视口宽度计算列数
pub fn columns_for_width(width: u32) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(max, _)| width <= *max)
        .map(|(_, cols)| *cols)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// 单张图片的渲染信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub image: Image,
    /// 删除/收藏按钮是否可见，只有种植者可以看到
    pub show_controls: bool,
    pub is_favorite: bool,
    /// 收藏按钮是否可点，已有收藏图后全部禁用
    pub favorite_enabled: bool,
}

/// 为当前查看者生成图库条目
pub fn items(collection: &ImageCollection, viewer: &Session) -> Vec<GalleryItem> {
    let show_controls = viewer.is_grower();
    let favorite_enabled = collection.can_select_favorite();

    collection
        .images()
        .iter()
        .enumerate()
        .map(|(i, image)| GalleryItem {
            image: image.clone(),
            show_controls,
            is_favorite: collection.favorite_index() == Some(i),
            favorite_enabled,
        })
        .collect()
}

/// 图片地址缓存的增量
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UrlDelta {
    /// 需要下载的 (图片 id, 文件名)
    pub fetch: Vec<(String, String)>,
    /// 不再显示、需要回收的图片 id
    pub revoke: Vec<String>,
}

/// 对比已请求过的图片和当前条目，只下载新图片、只回收被移除的图片
pub fn url_delta(known: &HashSet<String>, items: &[GalleryItem]) -> UrlDelta {
    let wanted: HashSet<&str> = items.iter().map(|item| item.image.id.as_str()).collect();

    let mut revoke: Vec<String> = known
        .iter()
        .filter(|id| !wanted.contains(id.as_str()))
        .cloned()
        .collect();
    revoke.sort();

    let fetch = items
        .iter()
        .filter(|item| !known.contains(&item.image.id))
        .map(|item| (item.image.id.clone(), item.image.filename().to_string()))
        .collect();

    UrlDelta { fetch, revoke }
}

/// 瀑布流布局：按顺序轮流分配到各列
pub fn distribute<T: Clone>(items: &[T], columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut out = vec![Vec::new(); columns];
    for (i, item) in items.iter().enumerate() {
        out[i % columns].push(item.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn image(id: &str, favorite: bool) -> Image {
        Image {
            id: id.into(),
            entity_id: "e".into(),
            url: String::new(),
            note: String::new(),
            favorite,
        }
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(columns_for_width(320), 1);
        assert_eq!(columns_for_width(550), 1);
        assert_eq!(columns_for_width(551), 2);
        assert_eq!(columns_for_width(991), 2);
        assert_eq!(columns_for_width(992), 3);
        assert_eq!(columns_for_width(1920), 3);
    }

    #[test]
    fn test_controls_only_for_growers() {
        let mut collection = ImageCollection::new();
        collection.replace(vec![image("1", false)]);

        let grower = Session::new("t", Some(Role::Grower));
        let retailer = Session::new("t", Some(Role::Retailer));

        assert!(items(&collection, &grower)[0].show_controls);
        assert!(!items(&collection, &retailer)[0].show_controls);
        assert!(!items(&collection, &Session::anonymous())[0].show_controls);
    }

    #[test]
    fn test_favorite_disables_selection() {
        let mut collection = ImageCollection::new();
        collection.replace(vec![image("1", false), image("2", true)]);

        let list = items(&collection, &Session::new("t", Some(Role::Grower)));
        assert!(!list[0].is_favorite);
        assert!(list[1].is_favorite);
        assert!(list.iter().all(|item| !item.favorite_enabled));
    }

    #[test]
    fn test_pending_selection_disables_buttons() {
        let mut collection = ImageCollection::new();
        collection.replace(vec![image("1", false), image("2", false)]);
        assert!(collection.begin_favorite("1"));

        let list = items(&collection, &Session::new("t", Some(Role::Grower)));
        assert!(list.iter().all(|item| !item.favorite_enabled));
        assert!(list.iter().all(|item| !item.is_favorite));
    }

    #[test]
    fn test_url_delta_only_touches_changed_images() {
        let mut collection = ImageCollection::new();
        collection.replace(vec![image("1", false), image("2", false)]);
        let viewer = Session::new("t", Some(Role::Grower));

        let first = url_delta(&HashSet::new(), &items(&collection, &viewer));
        assert_eq!(first.fetch.len(), 2);
        assert!(first.revoke.is_empty());

        // 收藏和删除之后：已下载的图片不再重复下载，只回收被删除的那张
        let known: HashSet<String> = ["1", "2"].iter().map(|s| s.to_string()).collect();
        collection.mark_favorite("1");
        collection.remove("2");
        collection.append(image("3", false));
        let delta = url_delta(&known, &items(&collection, &viewer));
        assert_eq!(delta.fetch, vec![("3".to_string(), "3".to_string())]);
        assert_eq!(delta.revoke, vec!["2".to_string()]);
    }

    #[test]
    fn test_distribute_round_robin() {
        let columns = distribute(&[1, 2, 3, 4, 5], 3);
        assert_eq!(columns, vec![vec![1, 4], vec![2, 5], vec![3]]);
        assert_eq!(distribute(&[1, 2], 0), vec![vec![1, 2]]);
    }
}
