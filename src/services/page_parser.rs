//! 记录页解析服务 - 业务能力层
//!
//! 只负责把一页 HTML 变成提交记录，不关心翻页和网络

use crate::models::submission::{SubmissionRecord, MEMORY_NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};
use std::fmt::Display;
use tracing::debug;

/// 一行数据至少需要的列数（提交时间 ~ 用时）
pub const MIN_COLUMNS: usize = 7;

/// 下一页按钮的文字
const NEXT_LABEL: &str = "Next";
const DISABLED_CLASS: &str = "disabled";

/// 单行解析失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFault {
    /// 单元格数量不足
    TooFewCells { found: usize },
}

impl Display for RowFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowFault::TooFewCells { found } => {
                write!(f, "expected at least {} cells, found {}", MIN_COLUMNS, found)
            }
        }
    }
}

/// 已校验列数的一行单元格文本
///
/// 列顺序固定：时间、题目、用户、语言、状态、分数、用时、[内存]。
#[derive(Debug)]
pub struct RowCells(Vec<String>);

impl RowCells {
    pub fn new(cells: Vec<String>) -> Result<Self, RowFault> {
        if cells.len() < MIN_COLUMNS {
            return Err(RowFault::TooFewCells { found: cells.len() });
        }
        Ok(Self(cells))
    }

    pub fn into_record(self) -> SubmissionRecord {
        // 列数已在 new() 中校验，前 7 列一定存在
        let mut cells = self.0.into_iter();
        SubmissionRecord {
            submitted_at: take(&mut cells),
            problem_label: take(&mut cells),
            user_label: take(&mut cells),
            language: take(&mut cells),
            status: take(&mut cells),
            score: take(&mut cells),
            time_used: take(&mut cells),
            memory_used: cells
                .next()
                .unwrap_or_else(|| MEMORY_NOT_AVAILABLE.to_string()),
        }
    }
}

/// 记录页解析器
///
/// 选择器只编译一次，可在整个运行期间复用。
pub struct PageParser {
    table: Selector,
    row: Selector,
    cell: Selector,
    anchor: Selector,
}

impl PageParser {
    pub fn new() -> Self {
        Self {
            table: compile("table"),
            row: compile("tr"),
            cell: compile("td"),
            anchor: compile("a"),
        }
    }

    /// 解析第一张表格中的提交记录
    ///
    /// 没有表格时返回空列表；第一行视为表头跳过；
    /// 列数不足的行被丢弃，不影响其他行。
    pub fn parse(&self, html: &str) -> Vec<SubmissionRecord> {
        let document = Html::parse_document(html);

        let Some(table) = document.select(&self.table).next() else {
            debug!("page has no table");
            return Vec::new();
        };

        let mut records = Vec::new();
        for (index, row) in table.select(&self.row).enumerate().skip(1) {
            let cells = row.select(&self.cell).map(cell_text).collect();
            match RowCells::new(cells) {
                Ok(cells) => records.push(cells.into_record()),
                Err(fault) => {
                    debug!("skipping row {}: {}", index, fault);
                }
            }
        }

        records
    }

    /// 是否存在可用的 "Next" 翻页按钮
    pub fn has_next(&self, html: &str) -> bool {
        let document = Html::parse_document(html);

        document
            .select(&self.anchor)
            .find(|a| sole_text(*a) == Some(NEXT_LABEL))
            .map(|a| !a.value().classes().any(|class| class == DISABLED_CLASS))
            .unwrap_or(false)
    }
}

impl Default for PageParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 元素唯一的文本内容
///
/// 只有一个子节点时向下查找：`<a><span>Next</span></a>` 得到 "Next"，
/// `<a>Ne<b>xt</b></a>` 有多个子节点，得到 None。
fn sole_text(element: ElementRef<'_>) -> Option<&str> {
    let mut children = element.children();
    let child = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match child.value().as_text() {
        Some(text) => Some(&**text),
        None => ElementRef::wrap(child).and_then(sole_text),
    }
}

fn take(cells: &mut impl Iterator<Item = String>) -> String {
    cells.next().unwrap_or_default()
}

fn compile(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector must be valid")
}

/// 单元格文本：各文本节点去掉首尾空白后拼接
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}
