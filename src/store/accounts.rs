// Copyright 2023 Remi Bernotavicius

use super::{check_max_length, check_required, delete_row, in_transaction, require, DeleteReport};
use crate::database;
use crate::database::models::{
    Diet, DietForm, DietId, FoodSchedule, FoodScheduleForm, FoodScheduleId, Profile, ProfileForm,
    ProfileId, User, UserForm, UserId,
};
use crate::database::schema::{diets, food_schedules, profiles, users};
use crate::error::{Error, Result};
use crate::store::relations::Table;
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::OptionalExtension as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

// Profiles

pub fn create_profile(conn: &mut database::Connection, form: &ProfileForm) -> Result<Profile> {
    check_required("profile kind", &form.kind, 30)?;
    in_transaction(conn, |conn| {
        let profile = diesel::insert_into(profiles::table)
            .values(form)
            .returning(Profile::as_returning())
            .get_result(conn)?;
        log::debug!("created profile {} {:?}", profile.id, profile.kind);
        Ok(profile)
    })
}

pub fn get_profile(conn: &mut database::Connection, id: ProfileId) -> Result<Profile> {
    profiles::table
        .find(id)
        .select(Profile::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Profiles, id.get()))
}

pub fn list_profiles(conn: &mut database::Connection) -> Result<Vec<Profile>> {
    Ok(profiles::table
        .select(Profile::as_select())
        .order(profiles::id)
        .load(conn)?)
}

pub fn update_profile(
    conn: &mut database::Connection,
    id: ProfileId,
    form: &ProfileForm,
) -> Result<Profile> {
    check_required("profile kind", &form.kind, 30)?;
    in_transaction(conn, |conn| {
        diesel::update(profiles::table.find(id))
            .set(form)
            .returning(Profile::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Profiles, id.get()))
    })
}

/// Also deletes every user with this profile, along with their diets and schedules. Fails if any
/// of those users still has meals.
pub fn delete_profile(conn: &mut database::Connection, id: ProfileId) -> Result<DeleteReport> {
    delete_row(conn, Table::Profiles, id.get())
}

// Users

fn validate_user(conn: &mut database::Connection, form: &UserForm) -> Result<()> {
    check_required("username", &form.username, 150)?;
    check_max_length("email", &form.email, 254)?;
    check_max_length("first name", &form.first_name, 150)?;
    check_max_length("last name", &form.last_name, 150)?;
    require(conn, Table::Profiles, form.profile_id.get())
}

pub fn create_user(conn: &mut database::Connection, form: &UserForm) -> Result<User> {
    in_transaction(conn, |conn| {
        validate_user(conn, form)?;
        let user = diesel::insert_into(users::table)
            .values((form, users::date_joined.eq(chrono::Utc::now().naive_utc())))
            .returning(User::as_returning())
            .get_result(conn)?;
        log::debug!("created user {} {:?}", user.id, user.username);
        Ok(user)
    })
}

pub fn get_user(conn: &mut database::Connection, id: UserId) -> Result<User> {
    users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Users, id.get()))
}

pub fn find_user_by_username(
    conn: &mut database::Connection,
    name: &str,
) -> Result<Option<User>> {
    Ok(users::table
        .select(User::as_select())
        .filter(users::username.eq(name))
        .first(conn)
        .optional()?)
}

pub fn list_users(conn: &mut database::Connection) -> Result<Vec<User>> {
    Ok(users::table
        .select(User::as_select())
        .order(users::username)
        .load(conn)?)
}

pub fn list_profile_users(
    conn: &mut database::Connection,
    profile: ProfileId,
) -> Result<Vec<User>> {
    let profile = get_profile(conn, profile)?;
    Ok(User::belonging_to(&profile)
        .select(User::as_select())
        .order(users::username)
        .load(conn)?)
}

pub fn update_user(conn: &mut database::Connection, id: UserId, form: &UserForm) -> Result<User> {
    in_transaction(conn, |conn| {
        validate_user(conn, form)?;
        diesel::update(users::table.find(id))
            .set(form)
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Users, id.get()))
    })
}

/// Fails while the user has meals. Otherwise their diets and schedules go with them.
pub fn delete_user(conn: &mut database::Connection, id: UserId) -> Result<DeleteReport> {
    delete_row(conn, Table::Users, id.get())
}

// Food schedules

pub fn create_food_schedule(
    conn: &mut database::Connection,
    user: UserId,
    form: &FoodScheduleForm,
) -> Result<FoodSchedule> {
    in_transaction(conn, |conn| {
        require(conn, Table::Users, user.get())?;
        let schedule = diesel::insert_into(food_schedules::table)
            .values((form, food_schedules::user_id.eq(user)))
            .returning(FoodSchedule::as_returning())
            .get_result(conn)?;
        log::debug!("created food schedule {} for user {user}", schedule.id);
        Ok(schedule)
    })
}

pub fn get_food_schedule(
    conn: &mut database::Connection,
    id: FoodScheduleId,
) -> Result<FoodSchedule> {
    food_schedules::table
        .find(id)
        .select(FoodSchedule::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::FoodSchedules, id.get()))
}

pub fn list_food_schedules(
    conn: &mut database::Connection,
    user: UserId,
    active_only: bool,
) -> Result<Vec<FoodSchedule>> {
    let user = get_user(conn, user)?;
    let mut query = FoodSchedule::belonging_to(&user)
        .select(FoodSchedule::as_select())
        .order(food_schedules::id)
        .into_boxed();
    if active_only {
        query = query.filter(food_schedules::active.eq(true));
    }
    Ok(query.load(conn)?)
}

pub fn update_food_schedule(
    conn: &mut database::Connection,
    id: FoodScheduleId,
    form: &FoodScheduleForm,
) -> Result<FoodSchedule> {
    in_transaction(conn, |conn| {
        diesel::update(food_schedules::table.find(id))
            .set(form)
            .returning(FoodSchedule::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::FoodSchedules, id.get()))
    })
}

pub fn delete_food_schedule(
    conn: &mut database::Connection,
    id: FoodScheduleId,
) -> Result<DeleteReport> {
    delete_row(conn, Table::FoodSchedules, id.get())
}

// Diets

fn validate_diet(form: &DietForm) -> Result<()> {
    if let Some(link) = &form.link {
        check_max_length("diet link", link, 100)?;
    }
    Ok(())
}

pub fn create_diet(conn: &mut database::Connection, user: UserId, form: &DietForm) -> Result<Diet> {
    validate_diet(form)?;
    in_transaction(conn, |conn| {
        require(conn, Table::Users, user.get())?;
        let diet = diesel::insert_into(diets::table)
            .values((form, diets::user_id.eq(user)))
            .returning(Diet::as_returning())
            .get_result(conn)?;
        log::debug!(
            "created diet {} for user {user} ({} calories)",
            diet.id,
            diet.total_calories
        );
        Ok(diet)
    })
}

pub fn get_diet(conn: &mut database::Connection, id: DietId) -> Result<Diet> {
    diets::table
        .find(id)
        .select(Diet::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Diets, id.get()))
}

pub fn list_diets(
    conn: &mut database::Connection,
    user: UserId,
    active_only: bool,
) -> Result<Vec<Diet>> {
    let user = get_user(conn, user)?;
    let mut query = Diet::belonging_to(&user)
        .select(Diet::as_select())
        .order(diets::id)
        .into_boxed();
    if active_only {
        query = query.filter(diets::active.eq(true));
    }
    Ok(query.load(conn)?)
}

pub fn update_diet(conn: &mut database::Connection, id: DietId, form: &DietForm) -> Result<Diet> {
    validate_diet(form)?;
    in_transaction(conn, |conn| {
        diesel::update(diets::table.find(id))
            .set(form)
            .returning(Diet::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Diets, id.get()))
    })
}

/// The diet's restricted ingredients and meals stay; their links to it are cleared.
pub fn delete_diet(conn: &mut database::Connection, id: DietId) -> Result<DeleteReport> {
    delete_row(conn, Table::Diets, id.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{MealForm, MealType};
    use crate::store::{create_meal, get_meal, junctions};

    fn profile(conn: &mut database::Connection, kind: &str) -> Profile {
        create_profile(conn, &ProfileForm { kind: kind.into() }).unwrap()
    }

    fn user(conn: &mut database::Connection, username: &str, profile: ProfileId) -> User {
        create_user(conn, &UserForm::new(username, profile)).unwrap()
    }

    fn diet(conn: &mut database::Connection, user: UserId) -> Diet {
        create_diet(
            conn,
            user,
            &DietForm {
                min_meals: 3,
                max_meals: 5,
                total_calories: 2200,
                link: None,
                active: true,
            },
        )
        .unwrap()
    }

    fn meal(conn: &mut database::Connection, user: UserId) -> crate::database::models::Meal {
        create_meal(
            conn,
            user,
            &MealForm {
                date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                meal_type: MealType::Lunch,
            },
        )
        .unwrap()
    }

    #[test]
    fn create_user_with_profile() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);

        assert_eq!(caio.username, "caio");
        assert!(caio.is_active);
        assert_eq!(get_profile(&mut conn, caio.profile_id).unwrap().kind, "Atleta");
        assert_eq!(
            find_user_by_username(&mut conn, "caio").unwrap(),
            Some(caio.clone())
        );
        assert_eq!(list_profile_users(&mut conn, athlete.id).unwrap(), vec![caio]);
    }

    #[test]
    fn rows_are_stored_with_their_owner() {
        let mut conn = database::establish_in_memory().unwrap();
        let before = chrono::Utc::now().naive_utc() - chrono::Duration::seconds(1);
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);
        assert!(caio.date_joined >= before);
        assert_eq!(caio.profile_id, athlete.id);

        let plan = diet(&mut conn, caio.id);
        assert_eq!(plan.user_id, caio.id);
        assert_eq!(plan.total_calories, 2200);
        assert_eq!(get_diet(&mut conn, plan.id).unwrap(), plan);

        let schedule = create_food_schedule(
            &mut conn,
            caio.id,
            &FoodScheduleForm {
                is_external_calendar: true,
                active: true,
            },
        )
        .unwrap();
        assert_eq!(schedule.user_id, caio.id);
        assert!(schedule.is_external_calendar);

        let lunch = meal(&mut conn, caio.id);
        assert_eq!(lunch.user_id, caio.id);
        assert_eq!(lunch.meal_type, MealType::Lunch);
    }

    #[test]
    fn user_requires_an_existing_profile() {
        let mut conn = database::establish_in_memory().unwrap();
        let e = create_user(&mut conn, &UserForm::new("caio", ProfileId::new(7))).unwrap_err();
        assert!(
            matches!(
                e,
                Error::NotFound {
                    entity: Table::Profiles,
                    id: 7
                }
            ),
            "{e}"
        );
        assert!(list_users(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn usernames_are_unique() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        user(&mut conn, "caio", athlete.id);
        let e = create_user(&mut conn, &UserForm::new("caio", athlete.id)).unwrap_err();
        assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
    }

    #[test]
    fn deleting_a_profile_deletes_its_users() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let other = profile(&mut conn, "Sedentário");
        let caio = user(&mut conn, "caio", athlete.id);
        let ana = user(&mut conn, "ana", athlete.id);
        let bia = user(&mut conn, "bia", other.id);
        let caio_diet = diet(&mut conn, caio.id);

        let report = delete_profile(&mut conn, athlete.id).unwrap();
        assert_eq!(report.deleted_count(Table::Users), 2);
        assert!(report.was_deleted(Table::Diets, caio_diet.id.get()));

        for id in [caio.id, ana.id] {
            assert!(matches!(
                get_user(&mut conn, id),
                Err(Error::NotFound {
                    entity: Table::Users,
                    ..
                })
            ));
        }
        assert!(matches!(
            get_diet(&mut conn, caio_diet.id),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(list_users(&mut conn).unwrap(), vec![bia]);
    }

    #[test]
    fn user_with_meals_cannot_be_deleted() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);
        let lunch = meal(&mut conn, caio.id);

        let e = delete_user(&mut conn, caio.id).unwrap_err();
        match e {
            Error::ReferentialIntegrity {
                entity, relation, ..
            } => {
                assert_eq!(entity, Table::Users);
                assert_eq!(relation.child, Table::Meals);
            }
            e => panic!("unexpected error {e}"),
        }

        assert_eq!(get_user(&mut conn, caio.id).unwrap(), caio);
        assert_eq!(get_meal(&mut conn, lunch.id).unwrap(), lunch);
    }

    #[test]
    fn profile_delete_blocked_by_a_users_meals_changes_nothing() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);
        let caio_diet = diet(&mut conn, caio.id);
        meal(&mut conn, caio.id);

        let e = delete_profile(&mut conn, athlete.id).unwrap_err();
        assert!(matches!(e, Error::ReferentialIntegrity { .. }), "{e}");

        assert_eq!(get_profile(&mut conn, athlete.id).unwrap(), athlete);
        assert_eq!(get_user(&mut conn, caio.id).unwrap(), caio);
        assert_eq!(get_diet(&mut conn, caio_diet.id).unwrap(), caio_diet);
    }

    #[test]
    fn deleting_a_user_cascades_and_clears_links() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);
        let caio_diet = diet(&mut conn, caio.id);
        let schedule = create_food_schedule(
            &mut conn,
            caio.id,
            &FoodScheduleForm {
                is_external_calendar: true,
                active: true,
            },
        )
        .unwrap();
        let lactose = crate::store::create_restriction(
            &mut conn,
            &crate::database::models::DietaryRestrictionForm {
                kind: "Lactose".into(),
                description: String::new(),
                active: true,
            },
        )
        .unwrap();
        junctions::add_user_restriction(&mut conn, caio.id, lactose.id).unwrap();

        let report = delete_user(&mut conn, caio.id).unwrap();
        assert!(report.was_deleted(Table::Diets, caio_diet.id.get()));
        assert!(report.was_deleted(Table::FoodSchedules, schedule.id.get()));
        assert_eq!(report.nullified, 1);

        let links = junctions::user_restriction_rows(&mut conn).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].user_id, None);
        assert_eq!(links[0].restriction_id, Some(lactose.id));

        // The profile is not touched by deleting one of its users.
        assert_eq!(get_profile(&mut conn, athlete.id).unwrap(), athlete);
    }

    #[test]
    fn update_user_fields() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let other = profile(&mut conn, "Vegano");
        let caio = user(&mut conn, "caio", athlete.id);

        let updated = update_user(
            &mut conn,
            caio.id,
            &UserForm {
                email: "caio@example.com".into(),
                first_name: "Caio".into(),
                ..UserForm::new("caio", other.id)
            },
        )
        .unwrap();
        assert_eq!(updated.email, "caio@example.com");
        assert_eq!(updated.profile_id, other.id);
        assert_eq!(updated.date_joined, caio.date_joined);

        let e = update_user(&mut conn, caio.id, &UserForm::new("caio", ProfileId::new(99)))
            .unwrap_err();
        assert!(matches!(e, Error::NotFound { id: 99, .. }), "{e}");
    }

    #[test]
    fn diets_and_schedules_visibility() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);
        let old = diet(&mut conn, caio.id);
        let current = diet(&mut conn, caio.id);

        update_diet(
            &mut conn,
            old.id,
            &DietForm {
                min_meals: old.min_meals,
                max_meals: old.max_meals,
                total_calories: old.total_calories,
                link: Some("https://example.com/dieta".into()),
                active: false,
            },
        )
        .unwrap();
        assert_eq!(list_diets(&mut conn, caio.id, true).unwrap(), vec![current]);
        assert_eq!(list_diets(&mut conn, caio.id, false).unwrap().len(), 2);

        let schedule = create_food_schedule(
            &mut conn,
            caio.id,
            &FoodScheduleForm {
                is_external_calendar: false,
                active: true,
            },
        )
        .unwrap();
        update_food_schedule(
            &mut conn,
            schedule.id,
            &FoodScheduleForm {
                is_external_calendar: false,
                active: false,
            },
        )
        .unwrap();
        assert!(list_food_schedules(&mut conn, caio.id, true).unwrap().is_empty());
        assert!(!get_food_schedule(&mut conn, schedule.id).unwrap().active);
    }

    #[test]
    fn diet_link_limit() {
        let mut conn = database::establish_in_memory().unwrap();
        let athlete = profile(&mut conn, "Atleta");
        let caio = user(&mut conn, "caio", athlete.id);
        let e = create_diet(
            &mut conn,
            caio.id,
            &DietForm {
                min_meals: 3,
                max_meals: 5,
                total_calories: 2200,
                link: Some("x".repeat(101)),
                active: true,
            },
        )
        .unwrap_err();
        assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
        assert!(list_diets(&mut conn, caio.id, false).unwrap().is_empty());
    }
}
