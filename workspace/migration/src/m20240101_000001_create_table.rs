use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string(Users::Phone).unique_key())
                    .col(string(Users::Email).unique_key())
                    .col(string_len(Users::Role, 20))
                    .col(string_null(Users::AvailabilityStatus))
                    .col(date_time(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create seeker_profiles table (1:1 with users)
        manager
            .create_table(
                Table::create()
                    .table(SeekerProfiles::Table)
                    .if_not_exists()
                    .col(integer(SeekerProfiles::UserId).primary_key())
                    .col(string_null(SeekerProfiles::Experience))
                    .col(string_null(SeekerProfiles::Education))
                    .col(integer_null(SeekerProfiles::ExpectedSalary))
                    .col(json(SeekerProfiles::JobTypes))
                    .col(json(SeekerProfiles::Availability))
                    .col(json(SeekerProfiles::Languages))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seeker_profile_user")
                            .from(SeekerProfiles::Table, SeekerProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employer_profiles table (1:1 with users)
        manager
            .create_table(
                Table::create()
                    .table(EmployerProfiles::Table)
                    .if_not_exists()
                    .col(integer(EmployerProfiles::UserId).primary_key())
                    .col(string(EmployerProfiles::CompanyName))
                    .col(string_null(EmployerProfiles::CompanyType))
                    .col(string_null(EmployerProfiles::Industry))
                    .col(string_null(EmployerProfiles::BusinessDescription))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employer_profile_user")
                            .from(EmployerProfiles::Table, EmployerProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create job_postings table
        manager
            .create_table(
                Table::create()
                    .table(JobPostings::Table)
                    .if_not_exists()
                    .col(pk_auto(JobPostings::Id))
                    .col(integer(JobPostings::UserId))
                    .col(string(JobPostings::Title))
                    .col(text(JobPostings::Description))
                    .col(text_null(JobPostings::Requirements))
                    .col(text_null(JobPostings::Benefits))
                    .col(string(JobPostings::Location))
                    .col(string(JobPostings::JobType))
                    .col(integer(JobPostings::Salary))
                    .col(integer(JobPostings::RequiredCandidates))
                    .col(integer(JobPostings::ApplicationsCount).default(0))
                    .col(integer(JobPostings::HiredCount).default(0))
                    .col(boolean(JobPostings::IsClosed).default(false))
                    .col(boolean(JobPostings::AutoClosed).default(false))
                    .col(string_len(JobPostings::Status, 20))
                    .col(date_time(JobPostings::PostedDate))
                    .col(date_time_null(JobPostings::ClosedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_posting_employer")
                            .from(JobPostings::Table, JobPostings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create applications table
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(pk_auto(Applications::Id))
                    .col(integer(Applications::JobId))
                    .col(integer(Applications::ApplicantId))
                    .col(integer(Applications::EmployerId))
                    .col(string(Applications::JobTitle))
                    .col(string(Applications::EmployerName))
                    .col(string(Applications::ApplicantName))
                    .col(string(Applications::ApplicantPhone))
                    .col(string(Applications::ApplicantEmail))
                    .col(string_null(Applications::ApplicantExperience))
                    .col(string_len(Applications::Status, 20))
                    .col(date_time(Applications::AppliedDate))
                    .col(date_time_null(Applications::ResponseDate))
                    .col(text_null(Applications::ResponseMessage))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_job")
                            .from(Applications::Table, Applications::JobId)
                            .to(JobPostings::Table, JobPostings::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_applicant")
                            .from(Applications::Table, Applications::ApplicantId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create job_offers table
        manager
            .create_table(
                Table::create()
                    .table(JobOffers::Table)
                    .if_not_exists()
                    .col(pk_auto(JobOffers::Id))
                    .col(integer(JobOffers::JobId))
                    .col(integer(JobOffers::EmployerId))
                    .col(integer(JobOffers::JobSeekerId))
                    .col(string(JobOffers::JobTitle))
                    .col(text(JobOffers::JobDescription))
                    .col(string(JobOffers::Location))
                    .col(string(JobOffers::EmployerName))
                    .col(integer(JobOffers::SalaryOffered))
                    .col(string_len(JobOffers::Status, 20))
                    .col(date_time(JobOffers::OfferedDate))
                    .col(date_time(JobOffers::ExpiresAt))
                    .col(date_time_null(JobOffers::ResponseDate))
                    .col(text_null(JobOffers::ResponseMessage))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_offer_job")
                            .from(JobOffers::Table, JobOffers::JobId)
                            .to(JobPostings::Table, JobPostings::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_offer_seeker")
                            .from(JobOffers::Table, JobOffers::JobSeekerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create congratulations_dismissed table
        manager
            .create_table(
                Table::create()
                    .table(CongratulationsDismissed::Table)
                    .if_not_exists()
                    .col(pk_auto(CongratulationsDismissed::Id))
                    .col(integer(CongratulationsDismissed::UserId))
                    .col(integer(CongratulationsDismissed::JobId))
                    .col(integer(CongratulationsDismissed::ApplicationId))
                    .col(date_time(CongratulationsDismissed::DismissedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_congratulations_dismissed_user")
                            .from(
                                CongratulationsDismissed::Table,
                                CongratulationsDismissed::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dismissals are idempotent set membership: one row per
        // (user, job, application) triple, enforced at the storage level.
        manager
            .create_index(
                Index::create()
                    .name("uq_congratulations_dismissed_triple")
                    .table(CongratulationsDismissed::Table)
                    .col(CongratulationsDismissed::UserId)
                    .col(CongratulationsDismissed::JobId)
                    .col(CongratulationsDismissed::ApplicationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(CongratulationsDismissed::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(JobOffers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JobPostings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployerProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeekerProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Phone,
    Email,
    Role,
    AvailabilityStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SeekerProfiles {
    Table,
    UserId,
    Experience,
    Education,
    ExpectedSalary,
    JobTypes,
    Availability,
    Languages,
}

#[derive(DeriveIden)]
enum EmployerProfiles {
    Table,
    UserId,
    CompanyName,
    CompanyType,
    Industry,
    BusinessDescription,
}

#[derive(DeriveIden)]
enum JobPostings {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Requirements,
    Benefits,
    Location,
    JobType,
    Salary,
    RequiredCandidates,
    ApplicationsCount,
    HiredCount,
    IsClosed,
    AutoClosed,
    Status,
    PostedDate,
    ClosedDate,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    JobId,
    ApplicantId,
    EmployerId,
    JobTitle,
    EmployerName,
    ApplicantName,
    ApplicantPhone,
    ApplicantEmail,
    ApplicantExperience,
    Status,
    AppliedDate,
    ResponseDate,
    ResponseMessage,
}

#[derive(DeriveIden)]
enum JobOffers {
    Table,
    Id,
    JobId,
    EmployerId,
    JobSeekerId,
    JobTitle,
    JobDescription,
    Location,
    EmployerName,
    SalaryOffered,
    Status,
    OfferedDate,
    ExpiresAt,
    ResponseDate,
    ResponseMessage,
}

#[derive(DeriveIden)]
enum CongratulationsDismissed {
    Table,
    Id,
    UserId,
    JobId,
    ApplicationId,
    DismissedAt,
}
