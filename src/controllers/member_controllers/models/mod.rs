use serde::Serialize;

use crate::models::member_models::Member;

#[derive(Serialize, Debug)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub group: String,
    pub contacts: Vec<ContactResponse>,
}

#[derive(Serialize, Debug)]
pub struct ContactResponse {
    pub name: String,
    pub email: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.to_hex(),
            name: member.name,
            group: member.group,
            contacts: member
                .contacts
                .into_iter()
                .map(|contact| ContactResponse {
                    name: contact.name,
                    email: contact.email,
                })
                .collect(),
        }
    }
}
