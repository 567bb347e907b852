//! Catalog Context - Content Tree
//!
//! Book -> Chapter -> Page 三层内容树

use serde::Serialize;
use std::collections::HashMap;

/// 书籍摘要（内容树根节点的输入）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// 章节摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub chapter_number: i64,
}

/// 页面摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: i64,
    pub content: String,
    pub page_number: i64,
}

/// 内容树
///
/// 不变量:
/// - 每个 Page 只属于一个 Chapter，每个 Chapter 只属于一本 Book
/// - 章节按 chapter_number 升序，页面按 page_number 升序（由调用方保证）
/// - 构建完成后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTree {
    id: i64,
    title: String,
    description: String,
    chapters: Vec<ChapterNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterNode {
    id: i64,
    title: String,
    description: String,
    chapter_number: i64,
    pages: Vec<PageNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNode {
    id: i64,
    content: String,
    page_number: i64,
}

impl ContentTree {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn chapters(&self) -> &[ChapterNode] {
        &self.chapters
    }

    /// 全书页面总数
    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|c| c.pages.len()).sum()
    }

    /// 按阅读顺序展开所有页面
    pub fn pages(&self) -> impl Iterator<Item = &PageNode> {
        self.chapters.iter().flat_map(|c| c.pages.iter())
    }
}

impl ChapterNode {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn chapter_number(&self) -> i64 {
        self.chapter_number
    }

    pub fn pages(&self) -> &[PageNode] {
        &self.pages
    }
}

impl PageNode {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }
}

impl From<PageSummary> for PageNode {
    fn from(page: PageSummary) -> Self {
        Self {
            id: page.id,
            content: page.content,
            page_number: page.page_number,
        }
    }
}

/// 组装内容树
///
/// 不会重新排序：章节和页面按输入顺序放入树中。
/// 在 `pages_by_chapter` 中没有条目的章节得到空的页面列表。
pub fn assemble_content_tree(
    book: BookSummary,
    chapters: Vec<ChapterSummary>,
    mut pages_by_chapter: HashMap<i64, Vec<PageSummary>>,
) -> ContentTree {
    let chapters = chapters
        .into_iter()
        .map(|chapter| {
            let pages = pages_by_chapter
                .remove(&chapter.id)
                .unwrap_or_default()
                .into_iter()
                .map(PageNode::from)
                .collect();

            ChapterNode {
                id: chapter.id,
                title: chapter.title,
                description: chapter.description,
                chapter_number: chapter.chapter_number,
                pages,
            }
        })
        .collect();

    ContentTree {
        id: book.id,
        title: book.title,
        description: book.description,
        chapters,
    }
}
