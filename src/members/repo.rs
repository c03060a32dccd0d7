use sqlx::PgConnection;

use super::repo_types::{Address, Member, MemberFields, MemberWithUserRow, NewAddress};

const SELECT_WITH_USER: &str = r#"
    SELECT m.member_user_id, m.house_rules, m.dependent_description,
           u.email, u.given_name, u.surname
      FROM members m
      JOIN users u ON u.user_id = m.member_user_id
"#;

pub async fn list(conn: &mut PgConnection) -> sqlx::Result<Vec<MemberWithUserRow>> {
    sqlx::query_as::<_, MemberWithUserRow>(&format!(
        "{SELECT_WITH_USER} ORDER BY m.member_user_id"
    ))
    .fetch_all(conn)
    .await
}

pub async fn find(
    conn: &mut PgConnection,
    member_id: i32,
) -> sqlx::Result<Option<MemberWithUserRow>> {
    sqlx::query_as::<_, MemberWithUserRow>(&format!(
        "{SELECT_WITH_USER} WHERE m.member_user_id = $1"
    ))
    .bind(member_id)
    .fetch_optional(conn)
    .await
}

pub async fn exists(conn: &mut PgConnection, member_id: i32) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM members WHERE member_user_id = $1)",
    )
    .bind(member_id)
    .fetch_one(conn)
    .await
}

pub async fn insert(
    conn: &mut PgConnection,
    user_id: i32,
    fields: &MemberFields,
) -> sqlx::Result<Member> {
    sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (member_user_id, house_rules, dependent_description)
        VALUES ($1, $2, $3)
        RETURNING member_user_id, house_rules, dependent_description
        "#,
    )
    .bind(user_id)
    .bind(&fields.house_rules)
    .bind(&fields.dependent_description)
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    member_id: i32,
    fields: &MemberFields,
) -> sqlx::Result<Option<Member>> {
    sqlx::query_as::<_, Member>(
        r#"
        UPDATE members
           SET house_rules = $2,
               dependent_description = $3
         WHERE member_user_id = $1
        RETURNING member_user_id, house_rules, dependent_description
        "#,
    )
    .bind(member_id)
    .bind(&fields.house_rules)
    .bind(&fields.dependent_description)
    .fetch_optional(conn)
    .await
}

pub async fn delete(conn: &mut PgConnection, member_id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM members WHERE member_user_id = $1")
        .bind(member_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn ids(conn: &mut PgConnection) -> sqlx::Result<Vec<i32>> {
    sqlx::query_scalar::<_, i32>("SELECT member_user_id FROM members")
        .fetch_all(conn)
        .await
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
        .fetch_one(conn)
        .await
}

pub async fn addresses_for(conn: &mut PgConnection, member_id: i32) -> sqlx::Result<Vec<Address>> {
    sqlx::query_as::<_, Address>(
        r#"
        SELECT address_id, member_user_id, house_number, street, town
          FROM addresses
         WHERE member_user_id = $1
         ORDER BY address_id
        "#,
    )
    .bind(member_id)
    .fetch_all(conn)
    .await
}

pub async fn insert_address(
    conn: &mut PgConnection,
    member_id: i32,
    address: &NewAddress,
) -> sqlx::Result<Address> {
    sqlx::query_as::<_, Address>(
        r#"
        INSERT INTO addresses (member_user_id, house_number, street, town)
        VALUES ($1, $2, $3, $4)
        RETURNING address_id, member_user_id, house_number, street, town
        "#,
    )
    .bind(member_id)
    .bind(&address.house_number)
    .bind(&address.street)
    .bind(&address.town)
    .fetch_one(conn)
    .await
}

/// Scoped to the member so an address id from another member is "not found".
pub async fn delete_address(
    conn: &mut PgConnection,
    member_id: i32,
    address_id: i32,
) -> sqlx::Result<bool> {
    let result =
        sqlx::query("DELETE FROM addresses WHERE address_id = $1 AND member_user_id = $2")
            .bind(address_id)
            .bind(member_id)
            .execute(conn)
            .await?;
    Ok(result.rows_affected() > 0)
}
