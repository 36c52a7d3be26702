//! 通用实体辅助
//!
//! 以字符串 id 为键的集合操作，id 为 8 位十六进制随机串（沿用既有
//! 数据格式），生成时在集合内查重。

use crate::error::{Result, StoreError};
use rand::Rng;

/// 带字符串 id 的实体
pub trait HasId {
    /// 实体名，用于错误信息与删除事件主题
    const ENTITY: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// 按 id 查找下标
pub fn index_of<T: HasId>(id: &str, data: &[T]) -> Result<usize> {
    data.iter()
        .position(|v| v.id() == id)
        .ok_or_else(|| StoreError::NotFound {
            entity: T::ENTITY,
            id: id.to_string(),
        })
}

/// 按 id 取副本
pub fn get<T: HasId + Clone>(id: &str, data: &[T]) -> Result<T> {
    Ok(data[index_of(id, data)?].clone())
}

/// 分配新 id 并追加，返回分配的 id
pub fn create<T: HasId>(mut v: T, data: &mut Vec<T>) -> String {
    v.set_id(generate_id(data));
    let id = v.id().to_string();
    data.push(v);
    id
}

/// 按 id 整体替换
pub fn update<T: HasId>(v: T, data: &mut Vec<T>) -> Result<()> {
    let index = index_of(v.id(), data)?;
    data[index] = v;
    Ok(())
}

/// 按 id 删除
pub fn delete<T: HasId>(id: &str, data: &mut Vec<T>) -> Result<()> {
    let index = index_of(id, data)?;
    data.remove(index);
    Ok(())
}

/// 生成集合内唯一的 8 位十六进制 id
pub fn generate_id<T: HasId>(data: &[T]) -> String {
    let mut rng = rand::rng();
    loop {
        let id = format!("{:08x}", rng.random::<u32>());
        if index_of(&id, data).is_err() {
            return id;
        }
    }
}
