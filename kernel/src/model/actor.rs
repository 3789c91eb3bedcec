use crate::model::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer(UserId),
    Administrator,
}

impl Actor {
    pub fn may_act_for(&self, owner: UserId) -> bool {
        match self {
            Actor::Customer(user_id) => *user_id == owner,
            Actor::Administrator => true,
        }
    }
}
