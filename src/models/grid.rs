use std::collections::HashMap;
use std::fmt::Display;

/// 一个抓取目标：某个用户在某道题上的提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub username: String,
    pub problem_id: String,
}

impl Job {
    pub fn new(username: impl Into<String>, problem_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            problem_id: problem_id.into(),
        }
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[用户 {} 题目 {}]", self.username, self.problem_id)
    }
}

/// 通过矩阵：用户 → 每道题的 0/1 结果
///
/// 行按用户插入顺序排列，列按题目参数顺序排列。
/// 每个用户恰好有 `problem_ids.len()` 个结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGrid {
    problem_ids: Vec<String>,
    rows: Vec<(String, Vec<u8>)>,
    /// 用户名 → rows 下标
    index: HashMap<String, usize>,
}

impl ResultGrid {
    pub fn new(problem_ids: Vec<String>) -> Self {
        Self {
            problem_ids,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn problem_ids(&self) -> &[String] {
        &self.problem_ids
    }

    /// 新增一个用户行（已存在则不重复添加）
    pub fn add_user(&mut self, username: &str) {
        if !self.index.contains_key(username) {
            self.index.insert(username.to_string(), self.rows.len());
            self.rows.push((username.to_string(), Vec::new()));
        }
    }

    /// 追加某个用户下一道题的结果
    ///
    /// 用户行不存在时会先创建。
    pub fn push_outcome(&mut self, username: &str, outcome: u8) {
        self.add_user(username);
        let position = self.index[username];
        let outcomes = &mut self.rows[position].1;
        debug_assert!(outcomes.len() < self.problem_ids.len());
        outcomes.push(outcome);
    }

    pub fn row(&self, username: &str) -> Option<&[u8]> {
        self.index
            .get(username)
            .map(|&position| self.rows[position].1.as_slice())
    }

    /// 按插入顺序遍历 (用户, 结果)
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.rows
            .iter()
            .map(|(name, outcomes)| (name.as_str(), outcomes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 每一行都填满了所有题目
    pub fn is_complete(&self) -> bool {
        self.rows
            .iter()
            .all(|(_, outcomes)| outcomes.len() == self.problem_ids.len())
    }
}
