// crates/od_foundation/src/index.rs

//! 强类型索引系统
//!
//! 使用泛型 `Idx<T>` 实现类型安全索引。
//!
//! # 设计目标
//!
//! 1. **类型安全**: 编译期区分不同类型的索引（Joint/Node/Member/PropSet）
//! 2. **零开销**: release 模式下与 u32 完全相同的性能
//! 3. **简洁API**: 提供类型别名和便捷方法
//!
//! 结构图在构建后不再增删元素，因此不需要代际验证，
//! 索引只携带位置值。
//!
//! # 示例
//!
//! ```
//! use od_foundation::index::JointIndex;
//!
//! let j = JointIndex::new(3);
//! assert_eq!(j.index(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

// ============================================================================
// 标记类型 (Phantom Types)
// ============================================================================

/// 关节点索引标记（输入文件中的 Joint）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointTag;

/// 水动力节点索引标记（Morison 离散化后的节点池）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeTag;

/// 构件索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberTag;

/// 截面属性集索引标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropSetTag;

// ============================================================================
// 泛型索引类型
// ============================================================================

/// 泛型强类型索引
///
/// 使用 Phantom Type `T` 区分不同类型的索引，避免误用。
#[derive(Serialize, Deserialize)]
#[repr(transparent)]
pub struct Idx<T> {
    /// 索引值
    index: u32,
    /// 类型标记
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

// 手动实现 Copy 和 Clone，因为 PhantomData<T> 的派生需要 T: Copy
impl<T> Copy for Idx<T> {}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Idx<T> {}

impl<T> Hash for Idx<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Idx<T> {
    /// 创建新索引
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// 从 usize 创建（调试模式下检查截断）
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        Self::new(index as u32)
    }

    /// 索引值
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// 作为 usize 使用（数组下标）
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.index as usize
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.index)
    }
}

impl<T> fmt::Display for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

// ============================================================================
// 类型别名
// ============================================================================

/// 关节点索引
pub type JointIndex = Idx<JointTag>;

/// 水动力节点索引
pub type NodeIndex = Idx<NodeTag>;

/// 构件索引
pub type MemberIndex = Idx<MemberTag>;

/// 截面属性集索引
pub type PropSetIndex = Idx<PropSetTag>;

/// 便捷构造：关节点索引
#[inline]
pub fn joint(i: usize) -> JointIndex {
    JointIndex::from_usize(i)
}

/// 便捷构造：水动力节点索引
#[inline]
pub fn node(i: usize) -> NodeIndex {
    NodeIndex::from_usize(i)
}

/// 便捷构造：构件索引
#[inline]
pub fn member(i: usize) -> MemberIndex {
    MemberIndex::from_usize(i)
}

/// 便捷构造：属性集索引
#[inline]
pub fn propset(i: usize) -> PropSetIndex {
    PropSetIndex::from_usize(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_basics() {
        let j = JointIndex::new(5);
        assert_eq!(j.index(), 5);
        assert_eq!(j.as_usize(), 5);
    }

    #[test]
    fn test_index_equality() {
        assert_eq!(joint(3), joint(3));
        assert_ne!(joint(3), joint(4));
    }

    #[test]
    fn test_index_ordering() {
        assert!(member(1) < member(2));
    }

    #[test]
    fn test_index_display() {
        assert_eq!(format!("{}", node(7)), "7");
        assert_eq!(format!("{:?}", node(7)), "Idx(7)");
    }

    #[test]
    fn test_index_in_hashmap() {
        use std::collections::HashMap;
        let mut map: HashMap<MemberIndex, f64> = HashMap::new();
        map.insert(member(0), 1.5);
        assert_eq!(map.get(&member(0)), Some(&1.5));
    }
}
