mod turn_role_test;
