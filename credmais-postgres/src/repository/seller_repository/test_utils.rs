#[cfg(test)]
pub mod test_utils {
    use credmais_db::models::seller::SellerModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_seller(owner_id: Option<Uuid>, name: &str) -> SellerModel {
        SellerModel {
            id: Uuid::new_v4(),
            owner_id,
            name: HeaplessString::try_from(name).unwrap(),
            phone: Some(HeaplessString::try_from("(11) 98888-0000").unwrap()),
        }
    }
}
