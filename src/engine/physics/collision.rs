use rapier2d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Controlled characters
    Character = 0b0000_0010,

    /// Floors and walls
    Environment = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Characters pass through each other; they only meet the environment
            CollisionGroups::Character => {
                Group::from_bits_truncate(CollisionGroups::Environment as u32)
            }

            CollisionGroups::Environment => Group::from_bits_truncate(
                CollisionGroups::Character as u32 | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}
